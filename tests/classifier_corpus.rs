//! Artifact naming corpus tests
//!
//! Real artifact names produced by product release pipelines, checked
//! against their canonical product name and variant. Grouped by category
//! the way release engineers report mismatches.

use release_metadata::{
    ArtifactClassifier, ArtifactFilter, ClassifierConfig, DiagnosticReason, Format, GroupBy,
    RepositoryRules, VariantRule, VariantRules,
};

fn classifier() -> ArtifactClassifier {
    ArtifactClassifier::new(ClassifierConfig::default()).unwrap()
}

fn product_name(repository: &str, filename: &str) -> String {
    let decision = classifier().classify_artifact(repository, filename);
    assert!(
        decision.is_grouped(),
        "Expected {} to be grouped, got: {:?}",
        filename,
        decision.diagnostics
    );
    decision.product_name.unwrap()
}

fn variant(repository: &str, filename: &str) -> Option<String> {
    classifier().classify_artifact(repository, filename).variant
}

// =============================================================================
// Category 1: Products without variants (consul)
// =============================================================================

#[test]
fn test_consul_dev_deb() {
    assert_eq!(product_name("consul", "consul_1.13.0~dev-1_arm64.deb"), "consul_1.13.0-dev");
}

#[test]
fn test_consul_release_deb() {
    assert_eq!(product_name("consul", "consul_1.11.3_arm64.deb"), "consul_1.11.3");
}

#[test]
fn test_consul_dev_rpm() {
    assert_eq!(product_name("consul", "consul-1.13.0~dev-1.aarch64.rpm"), "consul_1.13.0-dev");
}

#[test]
fn test_consul_release_rpm() {
    assert_eq!(product_name("consul", "consul-1.11.3.x86_64.rpm"), "consul_1.11.3");
}

#[test]
fn test_consul_dev_docker() {
    assert_eq!(
        product_name(
            "consul",
            "consul_default_linux_amd64_1.13.0-dev_77afe0e76e03f6f88376a99936945c0a70e544ac.docker.dev.tar"
        ),
        "consul_1.13.0-dev"
    );
}

#[test]
fn test_consul_release_docker() {
    assert_eq!(
        product_name(
            "consul",
            "consul_default_linux_amd64_1.11.3_36e73cdb6550d4e2cea7548e90ac2b531181ff9d.docker.tar"
        ),
        "consul_1.11.3"
    );
}

#[test]
fn test_consul_enterprise_docker_keeps_hyphenated_name() {
    assert_eq!(
        product_name(
            "consul-enterprise",
            "consul-enterprise_default_linux_386_1.13.0-dev+ent_4700797934aaf631edfeeb58ede73e6484778492.docker.dev.tar"
        ),
        "consul-enterprise_1.13.0-dev+ent"
    );
}

#[test]
fn test_consul_every_format_lands_in_one_group() {
    let names = [
        "consul_1.13.0~dev-1_arm64.deb",
        "consul-1.13.0~dev-1.aarch64.rpm",
        "consul_default_linux_amd64_1.13.0-dev_77afe0e76e03f6f88376a99936945c0a70e544ac.docker.dev.tar",
        "consul_1.13.0-dev_linux_amd64.zip",
    ];
    let outcome = classifier().group("consul", &names);

    assert!(outcome.is_clean(), "Unexpected diagnostics: {:?}", outcome.diagnostics);
    assert_eq!(outcome.groups.len(), 1);
    assert_eq!(outcome.groups["consul_1.13.0-dev"], names.to_vec());
}

// =============================================================================
// Category 2: consul-k8s (CLI and control plane)
// =============================================================================

#[test]
fn test_consul_k8s_cli_zip() {
    let name = "consul-k8s_0.46.0_windows_amd64.zip";
    assert_eq!(product_name("consul-k8s", name), "consul-k8s_0.46.0");
    assert_eq!(variant("consul-k8s", name).as_deref(), Some("consul-k8s"));
}

#[test]
fn test_consul_k8s_control_plane_zip() {
    let name = "consul-k8s-control-plane_0.46.0_darwin_arm64.zip";
    assert_eq!(product_name("consul-k8s", name), "consul-k8s-control-plane_0.46.0");
    assert_eq!(variant("consul-k8s", name).as_deref(), Some("consul-k8s-control-plane"));
}

#[test]
fn test_consul_k8s_docker_is_control_plane_variant() {
    let name =
        "consul-k8s_ubi_linux_amd64_0.46.0_45901d13d0fddf9067ebd1cfb18854c1ef943943.docker.dev.tar";
    assert_eq!(product_name("consul-k8s", name), "consul-k8s_0.46.0");
    assert_eq!(variant("consul-k8s", name).as_deref(), Some("consul-k8s-control-plane"));
}

#[test]
fn test_consul_k8s_grouped_by_variant() {
    let names = [
        "consul-k8s_0.46.0_windows_amd64.zip",
        "consul-k8s-control-plane_0.46.0_darwin_arm64.zip",
        "consul-k8s_ubi_linux_amd64_0.46.0_45901d13d0fddf9067ebd1cfb18854c1ef943943.docker.dev.tar",
        "consul-k8s_0.46.0_SHA256SUMS",
    ];
    let outcome = classifier().group_by("consul-k8s", &names, GroupBy::Variant);

    assert_eq!(outcome.groups["consul-k8s"], vec![names[0]]);
    assert_eq!(outcome.groups["consul-k8s-control-plane"], vec![names[1], names[2]]);
    assert_eq!(outcome.filtered, vec![names[3]]);
}

// =============================================================================
// Category 3: vault OSS and vault-enterprise flavors
// =============================================================================

#[test]
fn test_vault_dev_rpm() {
    assert_eq!(product_name("vault", "vault-1.12.0~dev1-1.armv7hl.rpm"), "vault_1.12.0-dev1");
}

#[test]
fn test_vault_ent_zip() {
    let name = "vault_1.12.0-dev1+ent_openbsd_arm.zip";
    assert_eq!(product_name("vault-enterprise", name), "vault_1.12.0-dev1+ent");
    assert_eq!(variant("vault-enterprise", name).as_deref(), Some("ent"));
}

#[test]
fn test_vault_ent_fips_zip() {
    let name = "vault_1.12.0-dev1+ent.fips1402_linux_amd64.zip";
    assert_eq!(product_name("vault-enterprise", name), "vault_1.12.0-dev1+ent.fips1402");
    assert_eq!(variant("vault-enterprise", name).as_deref(), Some("ent.fips"));
}

#[test]
fn test_vault_ent_hsm_zip() {
    let name = "vault_1.12.0-dev1+ent.hsm_linux_amd64.zip";
    assert_eq!(product_name("vault-enterprise", name), "vault_1.12.0-dev1+ent.hsm");
    assert_eq!(variant("vault-enterprise", name).as_deref(), Some("ent.hsm"));
}

#[test]
fn test_vault_ent_hsm_fips_zip() {
    let name = "vault_1.12.0-dev1+ent.hsm.fips1402_linux_amd64.zip";
    assert_eq!(product_name("vault-enterprise", name), "vault_1.12.0-dev1+ent.hsm.fips1402");
    assert_eq!(variant("vault-enterprise", name).as_deref(), Some("ent.hsm.fips"));
}

#[test]
fn test_vault_enterprise_rpm() {
    let name = "vault-enterprise-1.12.0~dev1+ent-1.armv7hl.rpm";
    assert_eq!(product_name("vault-enterprise", name), "vault-enterprise_1.12.0-dev1+ent");
    assert_eq!(variant("vault-enterprise", name).as_deref(), Some("ent"));
}

#[test]
fn test_vault_enterprise_hsm_rpm() {
    let name = "vault-enterprise-hsm-1.12.0~dev1+ent-1.x86_64.rpm";
    assert_eq!(product_name("vault-enterprise", name), "vault-enterprise-hsm_1.12.0-dev1+ent");
    assert_eq!(variant("vault-enterprise", name).as_deref(), Some("ent.hsm"));
}

#[test]
fn test_vault_enterprise_full_release() {
    let names = [
        "vault_1.12.0-dev1+ent_linux_amd64.zip",
        "vault_1.12.0-dev1+ent.hsm_linux_amd64.zip",
        "vault_1.12.0-dev1+ent.fips1402_linux_amd64.zip",
        "vault_1.12.0-dev1+ent.hsm.fips1402_linux_amd64.zip",
        "vault-enterprise-hsm-1.12.0~dev1+ent-1.x86_64.rpm",
        "vault_1.12.0-dev1+ent_SHA256SUMS",
        "vault_1.12.0-dev1+ent_SHA256SUMS.sig",
        "vault_1.12.0-dev1+ent_linux_amd64.zip.json",
    ];
    let outcome = classifier().group_by("vault-enterprise", &names, GroupBy::ProductAndVariant);

    assert!(outcome.is_clean());
    assert_eq!(outcome.grouped_count(), 5);
    assert_eq!(outcome.filtered.len(), 3);
    assert_eq!(
        outcome.groups.keys().map(String::as_str).collect::<Vec<_>>(),
        vec![
            "ent.fips/vault_1.12.0-dev1+ent.fips1402",
            "ent.hsm.fips/vault_1.12.0-dev1+ent.hsm.fips1402",
            "ent.hsm/vault-enterprise-hsm_1.12.0-dev1+ent",
            "ent.hsm/vault_1.12.0-dev1+ent.hsm",
            "ent/vault_1.12.0-dev1+ent",
        ]
    );
}

// =============================================================================
// Category 4: Sidecar filtering
// =============================================================================

#[test]
fn test_sidecars_filtered_for_every_repository() {
    let sidecars = [
        "release-notes.json",
        "consul_1.11.3_SHA256SUMS",
        "consul_1.11.3_SHA256SUMS.sig",
        "metadata.json",
    ];
    for repository in ["consul", "vault-enterprise", "consul-k8s", "nomad"] {
        let outcome = classifier().group(repository, &sidecars);
        assert!(outcome.groups.is_empty(), "{} grouped a sidecar", repository);
        assert!(outcome.is_clean());
        assert_eq!(outcome.filtered.len(), sidecars.len());
    }
}

#[test]
fn test_extra_marker_added_to_defaults() {
    let mut config = ClassifierConfig::default();
    config.filter = ArtifactFilter::with_extra_markers([".spdx.json", ".sbom"]).unwrap();
    let classifier = ArtifactClassifier::new(config).unwrap();

    let outcome = classifier.group(
        "consul",
        &["consul_1.11.3_linux_amd64.sbom", "consul_1.11.3_SHA256SUMS", "consul_1.11.3_linux_amd64.zip"],
    );
    assert_eq!(outcome.filtered.len(), 2);
    assert_eq!(outcome.grouped_count(), 1);
}

// =============================================================================
// Category 5: Diagnostics
// =============================================================================

#[test]
fn test_unrecognized_version() {
    let outcome = classifier().group("consul", &["LICENSE", "consul_1.11.3_arm64.deb", "v1.2_notes.txt"]);

    assert_eq!(outcome.grouped_count(), 1);
    assert_eq!(
        outcome.diagnostic_codes(),
        vec!["LICENSE:UNRECOGNIZED_VERSION", "v1.2_notes.txt:UNRECOGNIZED_VERSION"]
    );
}

#[test]
fn test_leading_zero_component_skipped() {
    let decision = classifier().classify_artifact("consul", "consul_01.2.3_arm64.deb");
    // "01" is not a version component, the anchor starts at the "1" after it
    assert_eq!(decision.version.as_deref(), Some("1.2.3"));
}

#[test]
fn test_rpm_without_delimiter_is_kept_with_diagnostic() {
    let outcome = classifier().group("tool", &["1.2.3-1.x86_64.rpm"]);

    assert_eq!(outcome.groups["1.2.3"], vec!["1.2.3-1.x86_64.rpm"]);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(
        outcome.diagnostics[0].reason,
        DiagnosticReason::CorrectionFailed {
            format: Format::Rpm,
            product_name: "1.2.3".to_string(),
        }
    );
}

#[test]
fn test_unclassified_enterprise_artifact() {
    let outcome = classifier().group("vault-enterprise", &["vault_1.12.0_linux_amd64.zip"]);

    assert!(outcome.groups.is_empty());
    assert_eq!(
        outcome.diagnostic_codes(),
        vec!["vault_1.12.0_linux_amd64.zip:UNCLASSIFIED_ARTIFACT:vault-enterprise"]
    );
}

// =============================================================================
// Category 6: Grouping invariants
// =============================================================================

#[test]
fn test_product_names_are_canonical() {
    let names = [
        "consul_1.13.0~dev-1_arm64.deb",
        "consul-1.13.0~dev-1.aarch64.rpm",
        "vault-1.12.0~dev1-1.armv7hl.rpm",
        "vault-enterprise-hsm-1.12.0~dev1+ent-1.x86_64.rpm",
        "boundary_0.10.0~rc1-1_amd64.deb",
    ];
    for name in names {
        let product = classifier().classify_artifact("any", name).product_name.unwrap();
        assert!(!product.contains('~'), "{} kept a tilde", product);
        assert!(!product.ends_with("-1"), "{} kept a package revision", product);
    }
}

#[test]
fn test_duplicates_kept_in_input_order() {
    let names = [
        "consul_1.11.3_arm64.deb",
        "consul-1.11.3.x86_64.rpm",
        "consul_1.11.3_arm64.deb",
    ];
    let outcome = classifier().group("consul", &names);
    assert_eq!(outcome.groups["consul_1.11.3"], names.to_vec());
}

#[test]
fn test_configured_repository_rules() {
    let mut config = ClassifierConfig::default();
    config.variants = VariantRules::builtin().with_repository(
        "boundary-enterprise",
        RepositoryRules::new(vec![VariantRule::new(&["hcp"], "ent.hcp")]).with_fallback("ent"),
    );
    let classifier = ArtifactClassifier::new(config).unwrap();

    let outcome = classifier.group_by(
        "boundary-enterprise",
        &["boundary_0.10.0+hcp_linux_amd64.zip", "boundary_0.10.0+ent_linux_amd64.zip"],
        GroupBy::Variant,
    );
    assert!(outcome.is_clean());
    assert_eq!(outcome.groups.keys().collect::<Vec<_>>(), vec!["ent", "ent.hcp"]);
}
