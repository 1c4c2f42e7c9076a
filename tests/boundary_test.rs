use kac::boundary::{check_bump, BoundaryWarning};
use kac::domain::VersionNumber;
use kac::{ui, Changelog};

const FIXTURE: &str = include_str!("fixtures/CHANGELOG.md");

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_no_unreleased_changes_display() {
    let display_msg = BoundaryWarning::NoUnreleasedChanges.to_string();
    assert!(
        display_msg.contains("Unreleased"),
        "Message should mention the Unreleased section, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_already_released_display() {
    let warning = BoundaryWarning::VersionAlreadyReleased {
        version: "0.3.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("v0.3.0"),
        "Message should contain 'v0.3.0', got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_not_newer_display() {
    let warning = BoundaryWarning::VersionNotNewer {
        version: "0.2.9".to_string(),
        latest: "0.3.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("v0.2.9"), "got: {}", display_msg);
    assert!(display_msg.contains("v0.3.0"), "got: {}", display_msg);
}

#[test]
fn test_boundary_warning_no_git_remote_display() {
    let warning = BoundaryWarning::NoGitRemote {
        fallback_url: "https://github.com/OWNER/REPOSITORY".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("https://github.com/OWNER/REPOSITORY"),
        "Message should contain the fallback URL, got: {}",
        display_msg
    );
}

// ============================================================================
// check_bump against a full CHANGELOG
// ============================================================================

#[test]
fn test_check_bump_fixture() {
    let changelog = Changelog::parse(FIXTURE).unwrap();

    assert!(check_bump(&changelog, &VersionNumber::new(0, 4, 0)).is_empty());
    assert!(check_bump(&changelog, &VersionNumber::new(0, 3, 1)).is_empty());

    // 0.2.1 is older and already released; only the more specific warning is reported
    assert_eq!(
        check_bump(&changelog, &VersionNumber::new(0, 2, 1)),
        vec![BoundaryWarning::VersionAlreadyReleased {
            version: "0.2.1".to_string()
        }]
    );
}

#[test]
fn test_check_bump_build_metadata_is_not_newer() {
    let changelog = Changelog::parse(FIXTURE).unwrap();
    let build = VersionNumber::new(0, 3, 0).with_build("build.1");

    assert_eq!(
        check_bump(&changelog, &build),
        vec![BoundaryWarning::VersionNotNewer {
            version: "0.3.0+build.1".to_string(),
            latest: "0.3.0".to_string(),
        }]
    );
}

#[test]
fn test_display_boundary_warning_does_not_panic() {
    ui::display_boundary_warning(&BoundaryWarning::NoUnreleasedChanges);
    ui::display_boundary_warning(&BoundaryWarning::VersionNotNewer {
        version: "0.1.0".to_string(),
        latest: "0.3.0".to_string(),
    });
}
