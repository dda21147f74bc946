use docqa::domain::SessionId;

#[test]
fn given_session_id_when_displayed_and_parsed_then_round_trips() {
    let id = SessionId::new();

    let parsed: SessionId = id.to_string().parse().unwrap();

    assert_eq!(parsed, id);
}

#[test]
fn given_malformed_id_when_parsing_then_returns_error() {
    let result = "not-a-session".parse::<SessionId>();

    assert!(result.is_err());
}
