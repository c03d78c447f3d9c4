use floristeria_core::{
    placeholder_data_url, plan_for, profile_for_width, NextStep, ProbeOutcome,
};

#[test]
fn variant_plan_falls_back_to_the_original_source() {
    let profile = profile_for_width(700);
    let mut plan = plan_for("assets/ramos-elegantes/Ramo1.png", None, profile, true, true);
    assert_eq!(plan.current(), "assets/ramos-elegantes/Ramo1-md.webp");

    // Host without pre-generated variants: the sized URL 404s, the original
    // is retried once, then the chain is done.
    assert_eq!(
        plan.after_probe(ProbeOutcome::Failure),
        NextStep::RetryFallback("assets/ramos-elegantes/Ramo1.png".to_string())
    );
    assert_eq!(
        plan.after_probe(ProbeOutcome::Success),
        NextStep::Commit("assets/ramos-elegantes/Ramo1.png".to_string())
    );
}

#[test]
fn explicit_fallback_attribute_wins_over_the_original() {
    let profile = profile_for_width(300);
    let mut plan = plan_for(
        "assets/cajas-sorpresa/Caja1.png",
        Some("assets/cajas-sorpresa/Caja1-legacy.jpg"),
        profile,
        true,
        false,
    );
    assert_eq!(plan.current(), "assets/cajas-sorpresa/Caja1-sm.png");
    assert_eq!(
        plan.after_probe(ProbeOutcome::Failure),
        NextStep::RetryFallback("assets/cajas-sorpresa/Caja1-legacy.jpg".to_string())
    );
    assert_eq!(plan.after_probe(ProbeOutcome::Failure), NextStep::Placeholder);
}

#[test]
fn plain_plan_without_fallback_exhausts_to_placeholder() {
    let profile = profile_for_width(1024);
    let mut plan = plan_for("bad.png", None, profile, false, false);
    assert_eq!(plan.current(), "bad.png");
    assert_eq!(plan.after_probe(ProbeOutcome::Failure), NextStep::Placeholder);

    // What the browser side assigns at that point.
    let placeholder = placeholder_data_url(600, 400);
    assert!(placeholder.starts_with("data:image/svg+xml"));
}
