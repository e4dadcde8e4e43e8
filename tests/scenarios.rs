//! End-to-end scenarios for the built-in stages and chain rewiring.

use stage_chain::chain::{ChainBuilder, ChainError, FnStage, HandlerChain, RequestContext, StageId};
use stage_chain::config::{self, ChainConfig, StageKind};
use stage_chain::stages::{Authenticator, Authorizer, Sanitizer};

mod common;

use common::Probe;

const BOND: &str = "J.Bond - MySolidPassword";

/// authenticator → authorizer, then a sanitizer spliced in front.
fn bond_chain() -> (HandlerChain, StageId) {
    let mut chain = ChainBuilder::new()
        .stage(Authenticator::new(BOND, "007"))
        .stage(Authorizer::new(["007"]))
        .build();
    let sanitizer = chain.prepend(Sanitizer::default());
    (chain, sanitizer)
}

#[test]
fn test_valid_credential_passes_all_stages() {
    let (chain, _) = bond_chain();
    let mut ctx = RequestContext::new(BOND);

    assert_eq!(chain.process(&mut ctx), Ok(()));
    assert_eq!(ctx.visited(), ["sanitizer", "authenticator", "authorizer"]);
    assert_eq!(ctx.token(), Some("007"));
    assert_eq!(
        ctx.journal_messages(),
        vec![
            "Not injecting anything, are you?",
            "Greetings, Mr.Bond. What can I do for you?",
            "Here is the requested data",
        ]
    );
}

#[test]
fn test_wrong_credential_halts_at_authenticator() {
    let (chain, _) = bond_chain();
    let mut ctx = RequestContext::new("wrong");

    assert_eq!(chain.process(&mut ctx), Err(ChainError::AuthenticationFailed));
    assert_eq!(ctx.visited(), ["sanitizer", "authenticator"]);
    assert!(ctx.token().is_none());
    assert_eq!(ctx.journal_messages(), vec!["Not injecting anything, are you?"]);
}

#[test]
fn test_splice_new_entry_in_front() {
    let a = Probe::passing("a");
    let b = Probe::passing("b");
    let mut chain = ChainBuilder::new().stage(a.clone()).stage(b.clone()).build();
    let old_entry = chain.entry();

    let new = chain.prepend(Probe::passing("new"));

    assert_eq!(chain.entry(), Some(new));
    assert_eq!(chain.next_of(new), old_entry);

    let mut ctx = RequestContext::new("x");
    chain.process(&mut ctx).unwrap();
    assert_eq!(ctx.visited(), ["new", "a", "b"]);
}

#[test]
fn test_manual_splice_with_set_next() {
    let mut chain = ChainBuilder::new()
        .stage(Probe::passing("a"))
        .stage(Probe::passing("b"))
        .build();
    let head = chain.entry().unwrap();

    let new = chain.add(Probe::passing("new"));
    chain.set_next(new, Some(head)).unwrap();

    // The old entry still starts the old traversal.
    let mut ctx = RequestContext::new("x");
    chain.process(&mut ctx).unwrap();
    assert_eq!(ctx.visited(), ["a", "b"]);

    // Invoking at the new stage runs the longer chain.
    let mut ctx = RequestContext::new("x");
    chain.process_from(new, &mut ctx).unwrap();
    assert_eq!(ctx.visited(), ["new", "a", "b"]);

    chain.set_entry(new).unwrap();
    assert_eq!(chain.stage_names(), vec!["new", "a", "b"]);
}

#[test]
fn test_relink_only_affects_later_invocations() {
    let mut chain = ChainBuilder::new()
        .stage(Probe::passing("a"))
        .stage(Probe::passing("b"))
        .stage(Probe::passing("c"))
        .build();
    let a = chain.find("a").unwrap();
    let c = chain.find("c").unwrap();

    let mut first = RequestContext::new("x");
    chain.process(&mut first).unwrap();

    chain.set_next(a, Some(c)).unwrap();

    let mut second = RequestContext::new("x");
    chain.process(&mut second).unwrap();

    assert_eq!(first.visited(), ["a", "b", "c"]);
    assert_eq!(second.visited(), ["a", "c"]);
}

#[test]
fn test_field_visible_to_later_stage() {
    let chain = ChainBuilder::new()
        .stage(FnStage::new("tenant", |ctx: &mut RequestContext| {
            ctx.set_attribute("tenant", "mi6");
            Ok(())
        }))
        .stage(Probe::passing("middle"))
        .stage(FnStage::new("check", |ctx: &mut RequestContext| {
            match ctx.attribute("tenant") {
                Some("mi6") => Ok(()),
                _ => Err(ChainError::stage_failed("check", "tenant missing")),
            }
        }))
        .build();

    let mut ctx = RequestContext::new("x");
    assert_eq!(chain.process(&mut ctx), Ok(()));
}

#[test]
fn test_authorizer_without_token_is_denied() {
    // Authorizer placed first: the token cannot exist yet.
    let chain = ChainBuilder::new()
        .stage(Authorizer::new(["007"]))
        .stage(Authenticator::new(BOND, "007"))
        .build();

    let mut ctx = RequestContext::new(BOND);
    let err = chain.process(&mut ctx).unwrap_err();
    assert!(matches!(err, ChainError::AuthorizationDenied { .. }));
    assert_eq!(ctx.visited(), ["authorizer"]);
}

#[test]
fn test_assembled_default_chain_matches_manual_chain() {
    let assembled = config::assemble(&ChainConfig::default());
    let mut ctx = RequestContext::new(BOND);

    assembled.chain.process(&mut ctx).unwrap();
    assert_eq!(ctx.visited(), ["sanitizer", "authenticator", "authorizer"]);
}

#[test]
fn test_prepend_cancellation_to_assembled_chain() {
    let config = ChainConfig::default();
    let mut assembled = config::assemble(&config);
    let guard = config::build_stage(StageKind::Cancellation, &config, &assembled.cancel);
    assembled.chain.prepend_shared(guard);

    assembled.cancel.cancel();
    let mut ctx = RequestContext::new(BOND);
    let err = assembled.chain.process(&mut ctx).unwrap_err();

    assert_eq!(err.label(), "cancelled");
    assert_eq!(ctx.visited(), ["cancellation"]);
    assert!(ctx.journal().is_empty());
}
