use futures::future::join_all;

mod utils;

use utils::*;

const NICE: [&str; 5] = ["👍", "🇳", "🇮", "🇨", "🇪"];

#[tokio::test]
async fn test_first_count_sets_a_record() {
    let setup = TestSetupBuilder::new().with_three_players().build().await;

    OutcomeAssertion::of(setup.count("u1", "1").await)
        .handled()
        .reacted_with(&["🤘"])
        .no_reply();

    let view = setup.counting.build_leaderboard(TENANT).await.unwrap();
    assert_eq!(view.count, 1);
    assert_eq!(view.high_score, 1);
}

#[tokio::test]
async fn test_counting_twice_in_a_row_is_ignored() {
    let setup = TestSetupBuilder::new().with_three_players().build().await;

    setup.count("u1", "1").await;

    OutcomeAssertion::of(setup.count("u1", "2").await)
        .handled()
        .reacted_with(&["👀"]);
    assert_eq!(setup.counting.build_leaderboard(TENANT).await.unwrap().count, 1);
}

#[tokio::test]
async fn test_repeats_allowed_when_configured() {
    let setup = TestSetupBuilder::new().allow_repeats().build().await;

    setup.count("u1", "1").await;

    OutcomeAssertion::of(setup.count("u1", "2").await).reacted_with(&["🤘"]);
}

#[tokio::test]
async fn test_wrong_guess_posts_loser_board() {
    let setup = TestSetupBuilder::new().with_three_players().build().await;

    setup.count("u1", "1").await;
    setup.count("u2", "2").await;

    OutcomeAssertion::of(setup.count("u1", "5").await)
        .handled()
        .reacted_with(&["👎"])
        .replied_with(
            "alice RUINED IT at 2!\n\n\
             Biggest contributors:\n1: alice, with 1 bumps\n2: bob, with 1 bumps\n\n\
             Biggest losers:\n1: alice, with 1 losses\n2: bob, with 0 losses\n\n\
             The count's at 0. High score is 2.",
        );
}

#[tokio::test]
async fn test_count_below_high_score_bumps() {
    let setup = TestSetupBuilder::new().with_three_players().build().await;

    setup.count_up_to(3, &["u1", "u2"]).await;
    setup.count("u3", "nope").await;

    OutcomeAssertion::of(setup.count("u1", "1").await).reacted_with(&["👍"]);
    OutcomeAssertion::of(setup.count("u2", "2").await).reacted_with(&["👍"]);
    OutcomeAssertion::of(setup.count("u1", "3").await).reacted_with(&["👍"]);
    OutcomeAssertion::of(setup.count("u2", "4").await).reacted_with(&["🤘"]);
}

#[tokio::test]
async fn test_nice_numbers_spell_it_out() {
    let setup = TestSetupBuilder::new().with_three_players().build().await;

    setup.count_up_to(70, &["u1", "u2"]).await;
    setup.count("u3", "oops").await;
    setup.count_up_to(68, &["u1", "u2"]).await;

    OutcomeAssertion::of(setup.count("u1", "69").await).reacted_with(&NICE);
    OutcomeAssertion::of(setup.count("u2", "70").await).reacted_with(&["👍"]);
}

#[tokio::test]
async fn test_evaluator_output_is_the_guess() {
    let setup = TestSetupBuilder::new().with_three_players().build().await;
    setup.evaluator.answer("one plus one", "2").await;

    setup.count("u1", "1").await;

    OutcomeAssertion::of(setup.count("u2", "one plus one").await).reacted_with(&["🤘"]);
    assert_eq!(setup.counting.build_leaderboard(TENANT).await.unwrap().count, 2);
}

#[tokio::test]
async fn test_guess_match_is_exact() {
    let setup = TestSetupBuilder::new().with_three_players().build().await;

    setup.count("u1", "1").await;

    OutcomeAssertion::of(setup.count("u2", "02").await).reacted_with(&["👎"]);
}

#[tokio::test]
async fn test_evaluator_outage_drops_message() {
    let setup = TestSetupBuilder::new().with_three_players().build().await;
    setup.evaluator.fail_on("2").await;

    setup.count("u1", "1").await;

    OutcomeAssertion::of(setup.count("u2", "2").await)
        .handled()
        .no_actions();

    let view = setup.counting.build_leaderboard(TENANT).await.unwrap();
    assert_eq!(view.count, 1);
    assert!(view.top_losers.iter().all(|entry| entry.value == 0));
}

#[tokio::test]
async fn test_bot_and_off_channel_messages_are_not_counted() {
    let setup = TestSetupBuilder::new().with_three_players().build().await;

    OutcomeAssertion::of(setup.echo_from_bot("1").await).unhandled();
    OutcomeAssertion::of(setup.say_in("general", "u1", "1").await).unhandled();

    assert!(setup.evaluator.calls().await.is_empty());
    assert_eq!(setup.counting.build_leaderboard(TENANT).await.unwrap().count, 0);
}

#[tokio::test]
async fn test_leaderboard_command() {
    let setup = TestSetupBuilder::new().with_three_players().build().await;

    setup.count_up_to(3, &["u1", "u2"]).await;

    OutcomeAssertion::of(setup.command_in(COUNTING_CHANNEL, "leaderboard").await)
        .handled()
        .replied_with(
            "Biggest contributors:\n1: alice, with 2 bumps\n2: bob, with 1 bumps\n\n\
             Biggest losers:\n1: alice, with 0 losses\n2: bob, with 0 losses\n\n\
             The count's at 3. High score is 3.",
        );

    OutcomeAssertion::of(setup.command_in("general", "leaderboard").await).unhandled();
    OutcomeAssertion::of(setup.command_in(COUNTING_CHANNEL, "help").await).unhandled();
}

#[tokio::test]
async fn test_unregistered_players_show_as_unknown() {
    let setup = TestSetupBuilder::new().build().await;

    setup.count("u7", "1").await;

    let reply = OutcomeAssertion::of(setup.count("u8", "3").await).reply();
    assert!(reply.starts_with("unknown RUINED IT at 1!"));
}

#[tokio::test]
async fn test_concurrent_counts_keep_stats_consistent() {
    let setup = TestSetupBuilder::new().build().await;
    let players = ["p1", "p2", "p3", "p4", "p5"];

    let outcomes = join_all(
        (1..=20u64)
            .flat_map(|guess| players.iter().map(move |player| (*player, guess.to_string())))
            .map(|(player, guess)| {
                let setup = &setup;
                async move { setup.count(player, &guess).await }
            }),
    )
    .await;

    let mut advances = 0;
    let mut losses = 0;
    for outcome in &outcomes {
        for action in &outcome.actions {
            if let squawk::BotAction::React { emoji, .. } = action {
                match emoji.as_str() {
                    "👍" | "🤘" => advances += 1,
                    "👎" => losses += 1,
                    _ => {}
                }
            }
        }
    }

    let view = setup.counting.build_leaderboard(TENANT).await.unwrap();
    let bumps: u64 = view.top_contributors.iter().map(|entry| entry.value).sum();
    let lost: u64 = view.top_losers.iter().map(|entry| entry.value).sum();
    assert_eq!(bumps, advances);
    assert_eq!(lost, losses);
    assert!(view.high_score >= view.count);
}
