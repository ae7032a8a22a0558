//! Profile, selector, and override unit tests.

use cache_core::config::{Config, CpuModel, Overrides, PolicyKind};

#[test]
fn every_selector_resolves() {
    let cases = [
        ("nhm", CpuModel::Nehalem),
        ("nehalem", CpuModel::Nehalem),
        ("snb", CpuModel::SandyBridge),
        ("sandybridge", CpuModel::SandyBridge),
        ("ivb", CpuModel::IvyBridge),
        ("ivybridge", CpuModel::IvyBridge),
        ("hsw", CpuModel::Haswell),
        ("haswell", CpuModel::Haswell),
        ("skl", CpuModel::Skylake),
        ("skylake", CpuModel::Skylake),
        ("cfl", CpuModel::CoffeeLake),
        ("coffeelake", CpuModel::CoffeeLake),
    ];
    for (selector, expected) in cases {
        assert_eq!(CpuModel::from_selector(selector), Some(expected));
    }
}

#[test]
fn selectors_ignore_case() {
    assert_eq!(CpuModel::from_selector("HSW"), Some(CpuModel::Haswell));
    assert_eq!(CpuModel::from_selector("Skylake"), Some(CpuModel::Skylake));
}

#[test]
fn unknown_selectors_resolve_to_nothing() {
    assert_eq!(CpuModel::from_selector("pentium"), None);
    assert_eq!(CpuModel::from_selector(""), None);
}

#[test]
fn the_default_profile_is_coffee_lake() {
    assert_eq!(CpuModel::default(), CpuModel::CoffeeLake);
    assert_eq!(Config::default(), Config::for_cpu(CpuModel::CoffeeLake));
}

#[test]
fn l1_is_identical_across_generations() {
    let reference = Config::for_cpu(CpuModel::CoffeeLake).l1;
    for cpu in [
        CpuModel::Nehalem,
        CpuModel::SandyBridge,
        CpuModel::IvyBridge,
        CpuModel::Haswell,
        CpuModel::Skylake,
    ] {
        assert_eq!(Config::for_cpu(cpu).l1, reference);
    }
    assert_eq!(reference.sets, 64);
    assert_eq!(reference.ways, 8);
    assert_eq!(reference.latency, 4);
    assert_eq!(reference.policy, PolicyKind::TreePlru);
}

#[test]
fn profile_table_spot_checks() {
    let nhm = Config::for_cpu(CpuModel::Nehalem);
    assert_eq!(nhm.l3.sets, 4096);
    assert_eq!(nhm.l3.ways, 16);
    assert_eq!(nhm.l3.latency, 40);
    assert_eq!(nhm.l3.policy, PolicyKind::Mru);

    let snb = Config::for_cpu(CpuModel::SandyBridge);
    assert_eq!(snb.l3.policy, PolicyKind::MruN);
    assert_eq!(snb.l3.latency, 36);

    let skl = Config::for_cpu(CpuModel::Skylake);
    assert_eq!(skl.l2.sets, 1024);
    assert_eq!(skl.l2.ways, 4);
    assert_eq!(skl.l3.latency, 42);

    let cfl = Config::for_cpu(CpuModel::CoffeeLake);
    assert_eq!(cfl.l2.policy, PolicyKind::QlruH00M1R2U1);
    assert_eq!(cfl.l3.policy, PolicyKind::QlruH11M1R0U0);
    assert_eq!(cfl.memory_latency, 200);
}

#[test]
fn every_builtin_profile_validates() {
    for cpu in [
        CpuModel::Nehalem,
        CpuModel::SandyBridge,
        CpuModel::IvyBridge,
        CpuModel::Haswell,
        CpuModel::Skylake,
        CpuModel::CoffeeLake,
    ] {
        Config::for_cpu(cpu).validate().unwrap();
    }
}

#[test]
fn toml_overrides_apply_on_top_of_the_profile() {
    let overrides: Overrides = toml::from_str(
        r#"
        memory_latency = 150

        [l2]
        latency = 14
        policy = "PLRU"
        "#,
    )
    .unwrap();

    let mut config = Config::default();
    config.apply(&overrides);

    assert_eq!(config.memory_latency, 150);
    assert_eq!(config.l2.latency, 14);
    assert_eq!(config.l2.policy, PolicyKind::TreePlru);
    // Untouched fields keep their profile values.
    assert_eq!(config.l2.sets, 512);
    assert_eq!(config.l1, Config::default().l1);
    assert_eq!(config.l3, Config::default().l3);
}

#[test]
fn policy_names_round_trip_from_toml() {
    let overrides: Overrides = toml::from_str(
        r#"
        [l3]
        policy = "QLRU_H11_M1_R1_U2"
        "#,
    )
    .unwrap();
    assert_eq!(overrides.l3.policy, Some(PolicyKind::QlruH11M1R1U2));
}

#[test]
fn validation_rejects_broken_geometries() {
    let mut config = Config::default();
    config.l2.sets = 100;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.l3.ways = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.l3.policy = PolicyKind::TreePlru; // 16 ways will not fit a tree byte
    assert!(config.validate().is_err());
}
