use relay_tokens::{Encoding, TokenBudgeter, TRUNCATION_MARKER};

const MAX_TOKENS: usize = 150;

fn budgeter() -> TokenBudgeter {
    TokenBudgeter::new(Encoding::Cl100kBase).expect("cl100k table should load")
}

fn long_reply() -> String {
    // Roughly 500+ tokens of ordinary English prose.
    "The relay forwards each message to the model and trims the answer. ".repeat(45)
}

#[test]
fn empty_text_is_zero_tokens() {
    let result = budgeter().truncate("", MAX_TOKENS);
    assert_eq!(result.text, "");
    assert_eq!(result.token_count, 0);
    assert!(!result.truncated);
    assert!(!result.approximate);
}

#[test]
fn short_reply_is_returned_unchanged() {
    let b = budgeter();
    let reply = "Sure, the capital of France is Paris, a lovely city.";
    let result = b.truncate(reply, MAX_TOKENS);

    assert_eq!(result.text, reply);
    assert!(!result.truncated);
    assert_eq!(result.token_count, b.count(reply));
    assert!(result.token_count < MAX_TOKENS);
}

#[test]
fn reply_exactly_at_budget_is_not_cut() {
    let b = budgeter();
    let reply = long_reply();
    let exact = b.count(&reply);

    let result = b.truncate(&reply, exact);
    assert_eq!(result.text, reply);
    assert_eq!(result.token_count, exact);
    assert!(!result.truncated);
}

#[test]
fn long_reply_is_cut_to_budget_with_marker() {
    let b = budgeter();
    let reply = long_reply();
    assert!(b.count(&reply) > 500, "fixture should exceed 500 tokens");

    let result = b.truncate(&reply, MAX_TOKENS);
    assert!(result.truncated);
    assert_eq!(result.token_count, MAX_TOKENS);
    assert!(result.text.ends_with(TRUNCATION_MARKER));

    // The body is the decoded first MAX_TOKENS tokens with trailing
    // whitespace removed.
    let body = result
        .text
        .strip_suffix(TRUNCATION_MARKER)
        .expect("marker should be present");
    assert_eq!(body, body.trim_end());
    assert!(reply.starts_with(body));
    assert!(b.count(body) <= MAX_TOKENS);
    assert!(b.count(body) >= MAX_TOKENS - 2);
}

#[test]
fn retruncating_within_budget_is_idempotent() {
    let b = budgeter();
    let once = b.truncate(&long_reply(), MAX_TOKENS);
    assert!(once.truncated);

    // The marker adds tokens; with a limit that covers the marked text a
    // second pass must leave it alone rather than append another marker.
    let marked_len = b.count(&once.text);
    let twice = b.truncate(&once.text, marked_len);
    assert_eq!(twice.text, once.text);
    assert!(!twice.truncated);
    assert_eq!(twice.text.matches(TRUNCATION_MARKER).count(), 1);
}

#[test]
fn truncation_is_deterministic() {
    let b = budgeter();
    let reply = long_reply();
    assert_eq!(b.truncate(&reply, 42), b.truncate(&reply, 42));
}

#[test]
fn truncated_flag_tracks_token_length_not_characters() {
    let b = budgeter();
    // Long runs of a repeated character compress into few tokens, so a
    // character-length comparison would disagree with the token count.
    let reply = "a".repeat(400);
    let tokens = b.count(&reply);
    assert!(tokens < 400);

    let result = b.truncate(&reply, tokens);
    assert!(!result.truncated);
    let result = b.truncate(&reply, tokens - 1);
    assert!(result.truncated);
}

#[test]
fn other_bundled_tables_load() {
    for encoding in [Encoding::O200kBase, Encoding::P50kBase, Encoding::R50kBase] {
        let b = TokenBudgeter::new(encoding).expect("bundled table should load");
        assert!(b.is_exact());
        assert!(b.count("hello world") > 0);
    }
}
