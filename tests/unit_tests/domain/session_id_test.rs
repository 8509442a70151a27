use chat_gateway::domain::SessionId;

#[test]
fn given_new_session_ids_when_minted_then_they_differ() {
    assert_ne!(SessionId::new(), SessionId::new());
}

#[test]
fn given_cookie_value_when_parsing_then_preserves_token() {
    let session = SessionId::parse("abc-123").unwrap();
    assert_eq!(session.as_str(), "abc-123");
}

#[test]
fn given_blank_cookie_value_when_parsing_then_returns_none() {
    assert!(SessionId::parse("").is_none());
    assert!(SessionId::parse("   ").is_none());
}
