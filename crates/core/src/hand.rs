use crate::Card;

/// Raw blackjack total: Aces count 11, then drop to 1 one at a time while the
/// total is over 21. Hidden cards are skipped.
///
/// The softening threshold is always 21; a side's configured limit only
/// decides whether the result is a bust.
pub fn score_hand(hand: &[Card]) -> i32 {
    let mut score = 0i32;
    let mut aces = 0u32;
    for card in hand.iter().filter(|card| !card.hidden) {
        score += i32::from(card.value());
        if card.is_ace() {
            aces += 1;
        }
    }
    while score > 21 && aces > 0 {
        score -= 10;
        aces -= 1;
    }
    score
}

/// Raw score minus the side's modifier. May be negative or above the limit.
pub fn effective_score(hand: &[Card], modifier: i32) -> i32 {
    score_hand(hand) - modifier
}
