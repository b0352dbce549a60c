use tabletop::DECISION_TIMEOUT;
use tabletop::cards::Deck;
use tabletop::gameroom::*;
use tabletop::players::Mailbox;
use tabletop::uno::*;
use std::sync::Arc;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Pads a hand to seven cards with yellow nines.
fn hand(cards: Vec<UnoCard>) -> Vec<UnoCard> {
    let padding = 7 - cards.len();
    cards
        .into_iter()
        .chain((0..padding).map(|_| UnoCard::plain(Color::Yellow, 9)))
        .collect()
}

/// Seats one mailbox per hand and starts a room dealing exactly these cards.
fn room(hands: Vec<Vec<UnoCard>>, top: UnoCard, rest: Vec<UnoCard>) -> (Room<Uno>, Vec<Arc<Mailbox>>) {
    init();
    let boxes = (1..=hands.len() as u64)
        .map(|id| Mailbox::new(id, format!("P{}", id)))
        .collect::<Vec<_>>();
    let cards = hands
        .into_iter()
        .flat_map(hand)
        .chain(std::iter::once(top))
        .chain(rest)
        .collect::<Vec<_>>();
    let mut room = Room::new(1, Uno::seeded(0).with_deck(Deck::ordered(cards)));
    for mailbox in boxes.iter() {
        room.sit(mailbox.clone());
    }
    room.start();
    (room, boxes)
}

fn fillers(n: usize) -> Vec<UnoCard> {
    (0..n).map(|i| UnoCard::plain(Color::Green, (i % 10) as u8)).collect()
}

#[tokio::test]
async fn same_number_fits_other_color_and_number_does_not() {
    let (mut room, boxes) = room(
        vec![
            vec![UnoCard::plain(Color::Blue, 5), UnoCard::plain(Color::Green, 7)],
            vec![],
        ],
        UnoCard::plain(Color::Red, 5),
        fillers(4),
    );
    room.handle(Inbound::text(1, "2"));
    assert_eq!(room.table().turns().current(), 0);
    assert_eq!(room.rules().hand(0).len(), 7);
    room.handle(Inbound::text(1, "1"));
    assert_eq!(room.rules().top(), Some(&UnoCard::plain(Color::Blue, 5)));
    assert_eq!(room.rules().board().color, Color::Blue);
    assert_eq!(room.table().turns().current(), 1);
    room.flush().await.unwrap();
    let texts = boxes[0].texts();
    assert!(texts.contains(&String::from("You can't place 7 🟩 on 5 🟥")));
    assert!(texts.contains(&String::from("You play 5 🟦")));
    assert!(boxes[1].texts().contains(&String::from("<@1> plays 5 🟦")));
}

#[tokio::test]
async fn timeout_takes_the_pending_penalty() {
    let (mut room, boxes) = room(
        vec![vec![UnoCard::draw_two(Color::Red)], vec![]],
        UnoCard::plain(Color::Red, 5),
        fillers(4),
    );
    room.handle(Inbound::text(1, "1"));
    assert_eq!(room.rules().board().pending, 2);
    assert_eq!(room.table().turns().current(), 1);
    for _ in 0..DECISION_TIMEOUT {
        room.handle(Inbound::Tick);
    }
    assert_eq!(room.rules().board().pending, 0);
    assert_eq!(room.rules().hand(1).len(), 9);
    assert_eq!(room.table().turns().current(), 0);
    room.flush().await.unwrap();
    assert!(boxes[1].texts().contains(&String::from("You draw 2 cards")));
    assert!(boxes[0].texts().contains(&String::from("<@2> draws 2 cards")));
}

#[tokio::test]
async fn penalties_chain_until_someone_draws() {
    let (mut room, _) = room(
        vec![vec![UnoCard::draw_two(Color::Red)], vec![UnoCard::wild_draw_four()]],
        UnoCard::plain(Color::Red, 5),
        fillers(8),
    );
    room.handle(Inbound::text(1, "1"));
    room.handle(Inbound::text(2, "2"));
    assert_eq!(room.table().turns().current(), 1);
    room.handle(Inbound::text(2, "1"));
    assert!(room.rules().is_filling());
    room.handle(Inbound::Choice { player: 2, option: 0 });
    assert_eq!(*room.rules().board(), Board { color: Color::Red, pending: 6 });
    assert_eq!(room.table().turns().current(), 0);
    room.handle(Inbound::text(1, "draw"));
    assert_eq!(room.rules().hand(0).len(), 12);
    assert_eq!(room.rules().board().pending, 0);
}

#[tokio::test]
async fn wild_waits_for_a_color() {
    let (mut room, boxes) = room(
        vec![vec![UnoCard::wild()], vec![]],
        UnoCard::plain(Color::Red, 5),
        fillers(2),
    );
    room.handle(Inbound::text(1, "1"));
    assert_eq!(room.table().turns().current(), 0);
    assert_eq!(room.table().turns().countdown(), Some(DECISION_TIMEOUT));
    room.handle(Inbound::Choice { player: 2, option: 0 });
    room.handle(Inbound::Choice { player: 1, option: 7 });
    assert!(room.rules().is_filling());
    room.handle(Inbound::Choice { player: 1, option: 3 });
    assert_eq!(room.rules().board().color, Color::Blue);
    assert_eq!(room.table().turns().current(), 1);
    room.flush().await.unwrap();
    assert!(boxes[0].messages().contains(&Attribute::Color.prompt()));
    assert!(boxes[0].texts().contains(&String::from("There is no option #8")));
    assert!(boxes[1].texts().contains(&String::from("It's not your turn")));
    assert!(boxes[1].texts().contains(&String::from("<@1> plays Color change ⬛ and picks 🟦 blue")));
}

#[tokio::test]
async fn block_and_reverse_steer_the_turn() {
    let (mut room, _) = room(
        vec![
            vec![UnoCard::block(Color::Red), UnoCard::plain(Color::Red, 1)],
            vec![UnoCard::plain(Color::Blue, 1)],
            vec![UnoCard::reverse(Color::Red)],
        ],
        UnoCard::plain(Color::Red, 5),
        fillers(4),
    );
    room.handle(Inbound::text(1, "1"));
    assert_eq!(room.table().turns().current(), 2);
    room.handle(Inbound::text(3, "1"));
    assert_eq!(room.table().turns().direction(), Direction::Backward);
    assert_eq!(room.table().turns().current(), 1);
}

#[tokio::test]
async fn leaving_player_is_replaced_in_order() {
    let (mut room, boxes) = room(vec![vec![], vec![], vec![]], UnoCard::plain(Color::Red, 5), fillers(3));
    room.handle(Inbound::Leave(1));
    assert_eq!(room.table().len(), 2);
    assert_eq!(room.table().seat_of(2), Some(0));
    assert_eq!(room.table().turns().current(), 0);
    assert_eq!(room.rules().hand(0).len(), 7);
    room.handle(Inbound::Leave(3));
    assert_eq!(room.phase(), Phase::Over);
    assert_eq!(room.winner(), None);
    room.flush().await.unwrap();
    assert!(boxes[1].texts().contains(&String::from("<@1> left the game")));
    assert!(boxes[1].last().is_some_and(|m| m.to_string().contains("Nobody wins")));
}

#[tokio::test]
async fn last_card_wins() {
    let (mut room, boxes) = room(
        vec![(1..=7).map(|n| UnoCard::plain(Color::Red, n)).collect(), vec![]],
        UnoCard::plain(Color::Red, 9),
        fillers(10),
    );
    for _ in 0..6 {
        room.handle(Inbound::text(1, "1"));
        room.handle(Inbound::text(2, "draw"));
    }
    room.handle(Inbound::text(1, "1"));
    assert_eq!(room.phase(), Phase::Over);
    assert_eq!(room.winner(), Some(1));
    room.flush().await.unwrap();
    assert!(boxes[1].texts().contains(&String::from("<@1> plays 6 🟥 and calls Uno!")));
    assert!(boxes[1].last().is_some_and(|m| m.to_string().contains("<@1> wins!")));
}

/// Seat that never receives anything.
struct Gone;

#[async_trait::async_trait]
impl Recipient for Gone {
    async fn send(&self, _: &Message) -> anyhow::Result<()> {
        anyhow::bail!("socket closed")
    }
}

impl Player for Gone {
    fn id(&self) -> u64 {
        1
    }
    fn name(&self) -> &str {
        "gone"
    }
}

#[tokio::test]
async fn others_keep_hearing_past_an_unreachable_seat() {
    init();
    let ana = Mailbox::new(2, "ana");
    let cy = Mailbox::new(3, "cy");
    let cards = hand(vec![UnoCard::plain(Color::Blue, 5)])
        .into_iter()
        .chain(hand(vec![UnoCard::plain(Color::Blue, 6)]))
        .chain(hand(vec![]))
        .chain(std::iter::once(UnoCard::plain(Color::Red, 5)))
        .chain(fillers(4))
        .collect::<Vec<_>>();
    let mut room = Room::new(1, Uno::seeded(0).with_deck(Deck::ordered(cards)));
    room.sit(Arc::new(Gone));
    room.sit(ana.clone());
    room.sit(cy.clone());
    room.start();
    assert!(room.flush().await.is_err());
    room.handle(Inbound::text(1, "1"));
    assert!(room.flush().await.is_err());
    room.handle(Inbound::text(2, "1"));
    assert!(room.flush().await.is_err());
    assert_eq!(room.table().turns().current(), 2);
    let heard = ana.texts();
    assert!(heard.contains(&String::from("<@1> plays 5 🟦")));
    assert!(heard.contains(&String::from("You play 6 🟦")));
    assert!(cy.texts().contains(&String::from("<@2> plays 6 🟦")));
}
