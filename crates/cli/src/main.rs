use anyhow::Context;
use brawljack_core::{
    Card, CombatantState, DuelState, Event, EventBus, GameConfig, GameError, GamePhase,
    InventoryItem, ItemId, ItemKind, Pause, RoundState, Side, Transition, Winner,
};
use brawljack_data::load_game_config;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone)]
struct CliOptions {
    seed: Option<u64>,
    assets: PathBuf,
    fast: bool,
    json_events: bool,
}

/// What `state json` prints.
#[derive(Serialize)]
struct Snapshot<'a> {
    phase: GamePhase,
    round: &'a RoundState,
    winner: Winner,
    player: &'a CombatantState,
    dealer: &'a CombatantState,
    loot: &'a [InventoryItem],
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    // Diagnostics go to stderr; stdout is the table.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut seed = std::env::var("BRAWLJACK_SEED")
        .ok()
        .and_then(|value| value.parse::<u64>().ok());
    let mut assets = PathBuf::from("assets");
    let mut fast = false;
    let mut json_events = false;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--fast" => fast = true,
            "--json-events" => json_events = true,
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--assets" => {
                if let Some(value) = args.get(idx + 1) {
                    assets = PathBuf::from(value);
                    idx += 1;
                }
            }
            other => tracing::warn!(arg = other, "ignoring unknown argument"),
        }
        idx += 1;
    }
    CliOptions {
        seed,
        assets,
        fast,
        json_events,
    }
}

fn load_config(options: &CliOptions) -> anyhow::Result<GameConfig> {
    if !options.assets.exists() {
        tracing::warn!(path = %options.assets.display(), "assets not found, using built-in rules");
        return Ok(GameConfig::default());
    }
    load_game_config(&options.assets)
        .with_context(|| format!("load assets from {}", options.assets.display()))
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    let config = load_config(&options)?;
    let mut duel = match options.seed {
        Some(seed) => DuelState::with_seed(config, seed),
        None => DuelState::new(config),
    };
    tracing::info!(seed = ?options.seed, "table ready");

    let mut events = EventBus::default();
    print_help();
    let transition = duel.start_game(&mut events)?;
    settle(&mut duel, &mut events, &options, transition)?;

    loop {
        let Some(line) = read_line(&prompt_text(&duel)) else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();
        let result = match cmd {
            "help" | "h" | "?" => {
                print_help();
                continue;
            }
            "quit" | "exit" | "q" => break,
            "state" | "s" => {
                if args.first() == Some(&"json") {
                    print_snapshot(&duel)?;
                } else {
                    print_state(&duel);
                }
                continue;
            }
            "start" | "new" => duel.start_game(&mut events),
            "hit" => duel.hit(&mut events),
            "stand" => duel.stand(&mut events),
            "ok" | "done" => duel.dismiss_reveal(),
            "pass" => duel.pass_loot(&mut events),
            "use" => match inventory_id(&duel, &args) {
                Some(id) => duel.use_item(Side::Player, id, &mut events),
                None => {
                    println!("usage: use <slot>");
                    continue;
                }
            },
            "pick" => {
                let option = args.first().and_then(|raw| parse_index(raw));
                let slot = args.get(1).and_then(|raw| parse_index(raw));
                match option.and_then(|index| duel.loot_options().get(index)) {
                    Some(item) => {
                        let id = item.id;
                        duel.choose_loot_item(id, slot, &mut events)
                    }
                    None => {
                        println!("usage: pick <option> [slot to replace]");
                        continue;
                    }
                }
            }
            "choose" => {
                let choice = args
                    .first()
                    .and_then(|raw| parse_index(raw))
                    .and_then(|index| duel.card_choices().get(index).copied());
                match choice {
                    Some(card) => duel.choose_random_card(card, &mut events),
                    None => {
                        println!("usage: choose <card>");
                        continue;
                    }
                }
            }
            "limit" => {
                let limit = args.first().and_then(|raw| raw.parse::<i32>().ok());
                let side = match args.get(1).copied() {
                    Some("rival") | Some("dealer") => Side::Dealer,
                    _ => Side::Player,
                };
                match limit {
                    Some(limit) => duel.configure_limit(side, limit, &mut events),
                    None => {
                        println!("usage: limit <value> [me|rival]");
                        continue;
                    }
                }
            }
            _ => {
                println!("unknown command: {cmd} (type help)");
                continue;
            }
        };
        match result {
            Ok(transition) => settle(&mut duel, &mut events, &options, transition)?,
            Err(err) => report_error(&err),
        }
    }
    Ok(())
}

/// Show what happened, wait out the pause, then run the dealer and the round
/// settle on the caller's clock until the player has something to do.
fn settle(
    duel: &mut DuelState,
    events: &mut EventBus,
    options: &CliOptions,
    mut transition: Transition,
) -> anyhow::Result<()> {
    loop {
        flush_events(events, options)?;
        if let Some(pause) = transition.pause {
            wait(duel, pause, options);
        }
        transition = match duel.phase() {
            GamePhase::DealerTurn => duel.dealer_tick(events)?,
            GamePhase::RoundOver => duel.settle_round(events)?,
            _ => break,
        };
    }
    print_table(duel);
    Ok(())
}

fn wait(duel: &DuelState, pause: Pause, options: &CliOptions) {
    if options.fast {
        return;
    }
    thread::sleep(duel.config().pause_duration(pause));
}

fn flush_events(events: &mut EventBus, options: &CliOptions) -> anyhow::Result<()> {
    for event in events.drain() {
        if options.json_events {
            println!("{}", serde_json::to_string(&event).context("encode event")?);
        } else {
            println!("  {}", describe_event(&event));
        }
    }
    Ok(())
}

fn report_error(err: &GameError) {
    if err.is_illegal_action() {
        println!("not now: {err}");
    } else {
        println!("{err}; pick a slot to replace, e.g. `pick 1 2`");
    }
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).ok()? == 0 {
        return None;
    }
    Some(line.trim_end_matches(&['\n', '\r'][..]).to_string())
}

/// 1-based on screen, 0-based in the engine.
fn parse_index(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok()?.checked_sub(1)
}

fn inventory_id(duel: &DuelState, args: &[&str]) -> Option<ItemId> {
    let index = parse_index(args.first()?)?;
    duel.inventory(Side::Player)
        .items
        .get(index)
        .map(|item| item.id)
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Player => "You",
        Side::Dealer => "Rival",
    }
}

fn item_label(item: &InventoryItem) -> String {
    match item.kind {
        ItemKind::Heal => format!("Potion (+{} HP)", item.value),
        ItemKind::ScoreModifier => format!("Modifier (-{})", item.value),
        ItemKind::ScoreBoost => format!("Boost (+{})", item.value),
        ItemKind::Poison => format!("Poison ({}/round)", item.value),
        ItemKind::Antidote => "Antidote".to_string(),
        ItemKind::ChoiceCard => "Pick a card".to_string(),
        ItemKind::Sabotage => "Dagger".to_string(),
        ItemKind::HandSwap => "Hand swap".to_string(),
        ItemKind::SeeNext3 => "Peek 3".to_string(),
        ItemKind::Spy => "Spy".to_string(),
        ItemKind::ScoreLimitChange => "Limit change".to_string(),
        ItemKind::Thief => "Thief".to_string(),
    }
}

fn winner_text(winner: Winner) -> &'static str {
    match winner {
        Winner::Player => "you win",
        Winner::Dealer => "the rival wins",
        Winner::Push => "push",
        Winner::None => "no result",
    }
}

fn cards_text(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe_event(event: &Event) -> String {
    match event {
        Event::GameStarted => "A new duel begins.".to_string(),
        Event::RoundStarted { round } => format!("Round {round}."),
        Event::DecksShuffled => "Both decks are shuffled.".to_string(),
        Event::PoisonDamage { side, damage, hp } => {
            format!("{}: poison deals {damage} (HP {hp}).", side_name(*side))
        }
        Event::CardDrawn { side, card } => format!("{} drew {card}.", side_name(*side)),
        Event::Stood { side } => format!("{} stands.", side_name(*side)),
        Event::BustWarning { side, score, limit } => format!(
            "{} went over: {score}/{limit}. Use a modifier or a thief, or stand.",
            side_name(*side)
        ),
        Event::ItemUsed { side, item } => {
            format!("{} used {}.", side_name(*side), item_label(item))
        }
        Event::Healed { side, amount, hp } => {
            format!("{} healed {amount} (HP {hp}).", side_name(*side))
        }
        Event::ModifierChanged { side, modifier } => {
            format!("{} score modifier is now {modifier}.", side_name(*side))
        }
        Event::Poisoned { side, stacks } => {
            format!("{} is poisoned ({stacks}/round).", side_name(*side))
        }
        Event::Cured { side } => format!("{} is cured.", side_name(*side)),
        Event::CardChoicesOffered { cards } => {
            let listed: Vec<String> = cards
                .iter()
                .enumerate()
                .map(|(idx, card)| format!("{}) {card}", idx + 1))
                .collect();
            format!("Choose a card: {}", listed.join("  "))
        }
        Event::CardChosen { side, card } => format!("{} took {card}.", side_name(*side)),
        Event::CardRemoved { side, card } => {
            format!("{} lost {card} to a dagger.", side_name(*side))
        }
        Event::HandsSwapped => "Hands are swapped!".to_string(),
        Event::BackInPlay { side } => format!("{} is back in the game.", side_name(*side)),
        Event::TopCardsRevealed { owner, cards } => format!(
            "Next cards of {} deck: {}",
            match owner {
                Side::Player => "your",
                Side::Dealer => "the rival's",
            },
            cards_text(cards)
        ),
        Event::LimitChanged { side, limit } => {
            format!("{} limit is now {limit}.", side_name(*side))
        }
        Event::ItemStolen { thief, item } => {
            format!("{} stole {}.", side_name(*thief), item_label(item))
        }
        Event::RoundEnded {
            winner,
            damage,
            player_score,
            dealer_score,
        } => format!(
            "Round over, {player_score} vs {dealer_score}: {} ({damage} damage).",
            winner_text(*winner)
        ),
        Event::LootOffered { items } => {
            let listed: Vec<String> = items
                .iter()
                .enumerate()
                .map(|(idx, item)| format!("{}) {}", idx + 1, item_label(item)))
                .collect();
            format!("Loot: {}", listed.join("  "))
        }
        Event::LootTaken { item, replaced } => match replaced {
            Some(old) => format!("You dropped {} for {}.", item_label(old), item_label(item)),
            None => format!("You took {}.", item_label(item)),
        },
        Event::LootPassed => "You leave the loot.".to_string(),
        Event::RivalFoundItem { item } => format!("Rival found {}.", item_label(item)),
        Event::RivalSwappedItem { dropped, item } => format!(
            "Rival swapped {} for {}.",
            item_label(dropped),
            item_label(item)
        ),
        Event::GameOver { winner } => {
            format!("Game over: {}. Type `start` to play again.", winner_text(*winner))
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  hit | stand            draw a card or hold");
    println!("  use <slot>             use an inventory item");
    println!("  choose <n>             take one of the offered cards");
    println!("  limit <20|22> [me|rival]  set a score limit");
    println!("  ok                     close a deck peek");
    println!("  pick <n> [slot] | pass take or skip loot");
    println!("  state [json] | start | help | quit");
}

fn combatant_line(duel: &DuelState, side: Side) -> String {
    let who = duel.combatant(side);
    let mut line = format!(
        "{:<5} HP {:>2}/{}  score {:>2}/{}  {}",
        side_name(side),
        who.hp,
        duel.config().rules.max_hp,
        duel.display_score(side),
        who.score_limit,
        cards_text(&who.hand)
    );
    if who.is_poisoned() {
        line.push_str(&format!("  [poison {}]", who.poison_stacks));
    }
    if who.stood {
        line.push_str("  [stood]");
    }
    line
}

fn print_table(duel: &DuelState) {
    println!("{}", combatant_line(duel, Side::Dealer));
    println!("{}", combatant_line(duel, Side::Player));
}

fn print_state(duel: &DuelState) {
    let round = &duel.state().round;
    println!(
        "round {} ({} played), phase {:?}",
        round.round,
        round.rounds_played,
        duel.phase()
    );
    print_table(duel);
    for side in Side::BOTH {
        let items: Vec<String> = duel
            .inventory(side)
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| format!("{}) {}", idx + 1, item_label(item)))
            .collect();
        println!("{} items: {}", side_name(side), items.join("  "));
    }
    if !duel.revealed_cards().is_empty() {
        println!("revealed: {}", cards_text(duel.revealed_cards()));
    }
}

fn print_snapshot(duel: &DuelState) -> anyhow::Result<()> {
    let state = duel.state();
    let snapshot = Snapshot {
        phase: state.phase,
        round: &state.round,
        winner: state.winner,
        player: &state.player,
        dealer: &state.dealer,
        loot: duel.loot_options(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("encode state")?
    );
    Ok(())
}

fn prompt_text(duel: &DuelState) -> String {
    let hint = match duel.phase() {
        GamePhase::PlayerTurn => "hit/stand/use",
        GamePhase::BustRecovery => "use/stand",
        GamePhase::ChoosingRandomCard => "choose",
        GamePhase::ViewingDeck | GamePhase::Spying => "ok",
        GamePhase::ConfiguringLimit => "limit",
        GamePhase::LootSelection => "pick/pass",
        GamePhase::GameOver | GamePhase::Idle => "start/quit",
        GamePhase::DealerTurn | GamePhase::RoundOver => "wait",
    };
    format!("[{hint}]> ")
}
