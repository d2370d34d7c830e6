use git_bump::boundary::BoundaryWarning;
use git_bump::domain::Version;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_prerelease_discarded_display() {
    let warning = BoundaryWarning::PrereleaseDiscarded {
        from: Version::parse("1.0.0-rc.1").unwrap(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("1.0.0-rc.1"),
        "Message should contain the current version, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("dropped"),
        "Message should say labels are dropped, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_explicit_not_increasing_display() {
    let warning = BoundaryWarning::ExplicitNotIncreasing {
        from: Version::new(2, 0, 0),
        to: Version::new(1, 9, 0),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("'1.9.0' is not greater than current version '2.0.0'"),
        "got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_push_skipped_display() {
    let warning = BoundaryWarning::PushSkipped {
        remote: "upstream".to_string(),
        tag: "v1.2.3".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("git push upstream HEAD refs/tags/v1.2.3"),
        "Message should contain the manual push command, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_repository_state_display() {
    assert!(BoundaryWarning::DirtyWorkingTree
        .to_string()
        .contains("uncommitted changes"));
    assert!(BoundaryWarning::DetachedHead.to_string().contains("detached"));
}
