use sots_domain::ServiceRunState;

#[test]
fn test_parse_not_found() {
    assert_eq!(
        ServiceRunState::from_status_output(Some("NOT_FOUND\r\n")),
        ServiceRunState::NotFound
    );
}

#[test]
fn test_parse_running_and_stopped_ignore_case() {
    assert_eq!(
        ServiceRunState::from_status_output(Some("Running")),
        ServiceRunState::Running
    );
    assert_eq!(
        ServiceRunState::from_status_output(Some(" STOPPED ")),
        ServiceRunState::Stopped
    );
}

#[test]
fn test_missing_or_empty_output_is_unknown() {
    assert_eq!(
        ServiceRunState::from_status_output(None),
        ServiceRunState::ErrorUnknown
    );
    assert_eq!(
        ServiceRunState::from_status_output(Some("   ")),
        ServiceRunState::ErrorUnknown
    );
}

#[test]
fn test_unrecognized_output_is_unknown() {
    assert_eq!(
        ServiceRunState::from_status_output(Some("StartPending")),
        ServiceRunState::ErrorUnknown
    );
    // NOT_FOUND is matched exactly, unlike Running/Stopped
    assert_eq!(
        ServiceRunState::from_status_output(Some("not_found")),
        ServiceRunState::ErrorUnknown
    );
}

#[test]
fn test_is_present() {
    assert!(!ServiceRunState::NotFound.is_present());
    assert!(ServiceRunState::Stopped.is_present());
    assert!(ServiceRunState::Running.is_present());
    assert!(ServiceRunState::ErrorUnknown.is_present());
}
