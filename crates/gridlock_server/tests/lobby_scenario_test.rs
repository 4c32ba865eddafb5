//! End-to-end game flows through the lobby, no transport involved.

use gridlock_server::{
    Cell, ConnectionId, Envelope, Lobby, Player, ServerEvent, SessionId, Winner,
};

const C1: ConnectionId = ConnectionId::new(1);
const C2: ConnectionId = ConnectionId::new(2);
const C3: ConnectionId = ConnectionId::new(3);

fn events_for(envelopes: &[Envelope], to: ConnectionId) -> Vec<ServerEvent> {
    envelopes
        .iter()
        .filter(|e| e.to == to)
        .map(|e| e.event.clone())
        .collect()
}

fn start(lobby: &mut Lobby) -> SessionId {
    let waiting = lobby.connect(C1);
    assert!(matches!(
        events_for(&waiting, C1).as_slice(),
        [ServerEvent::Waiting { .. }]
    ));

    let started = lobby.connect(C2);
    let id = match &started[0].event {
        ServerEvent::GameStart { session_id, .. } => session_id.clone(),
        other => panic!("Unexpected start event: {other:?}"),
    };
    assert_eq!(
        started,
        vec![
            Envelope::new(
                C1,
                ServerEvent::GameStart {
                    session_id: id.clone(),
                    role: Player::X,
                },
            ),
            Envelope::new(
                C2,
                ServerEvent::GameStart {
                    session_id: id.clone(),
                    role: Player::O,
                },
            ),
        ]
    );
    id
}

#[test]
fn test_full_game_x_wins_on_row_one() {
    let mut lobby = Lobby::default();
    let id = start(&mut lobby);

    // C1 opens in the centre.
    let update = lobby.make_move(C1, &id, 2, 2);
    let recipients: Vec<_> = update.iter().map(|e| e.to).collect();
    assert_eq!(recipients, vec![C1, C2]);
    for envelope in &update {
        match &envelope.event {
            ServerEvent::UpdateBoard {
                board,
                current_player,
            } => {
                assert_eq!(*current_player, Player::O);
                assert_eq!(board.get(2, 2), Some(Cell::Occupied(Player::X)));
            }
            other => panic!("Unexpected update: {other:?}"),
        }
    }

    // C2 tries the same cell: nothing happens.
    assert!(lobby.make_move(C2, &id, 2, 2).is_empty());

    // O fills row 0 short of four while X builds row 1.
    let moves = [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2), (4, 4)];
    for (i, (row, col)) in moves.into_iter().enumerate() {
        let who = if i % 2 == 0 { C2 } else { C1 };
        let envelopes = lobby.make_move(who, &id, row, col);
        assert_eq!(envelopes.len(), 2, "move ({row}, {col}) not broadcast");
        assert!(matches!(envelopes[0].event, ServerEvent::UpdateBoard { .. }));
    }

    let over = lobby.make_move(C1, &id, 1, 3);
    assert_eq!(
        events_for(&over, C1),
        vec![ServerEvent::GameOver { winner: Winner::X }]
    );
    assert_eq!(
        events_for(&over, C2),
        vec![ServerEvent::GameOver { winner: Winner::X }]
    );

    assert!(lobby.registry().get(&id).is_err());
    assert!(lobby.make_move(C2, &id, 3, 3).is_empty());
}

#[test]
fn test_turn_parity_until_terminal() {
    let mut lobby = Lobby::default();
    let id = start(&mut lobby);

    let moves = [(0, 0), (0, 4), (2, 0), (2, 4), (4, 1), (4, 3), (1, 2)];
    for (i, (row, col)) in moves.into_iter().enumerate() {
        let mover = if i % 2 == 0 { C1 } else { C2 };
        let envelopes = lobby.make_move(mover, &id, row, col);
        let expected = if (i + 1) % 2 == 0 { Player::X } else { Player::O };
        match &envelopes[0].event {
            ServerEvent::UpdateBoard { current_player, .. } => {
                assert_eq!(*current_player, expected, "after {} moves", i + 1)
            }
            other => panic!("Unexpected event: {other:?}"),
        }
        assert_eq!(
            *lobby.registry().get(&id).expect("Live session").turn(),
            expected
        );
    }
}

#[test]
fn test_waiting_player_leaves_before_pairing() {
    let mut lobby = Lobby::default();
    lobby.connect(C1);
    assert_eq!(lobby.pending(), Some(C1));

    assert!(lobby.disconnect(C1).is_empty());
    assert_eq!(lobby.pending(), None);

    let envelopes = lobby.connect(C3);
    assert_eq!(
        envelopes,
        vec![Envelope::new(
            C3,
            ServerEvent::Waiting {
                message: "Waiting for an opponent...".to_string()
            }
        )]
    );
    assert_eq!(lobby.pending(), Some(C3));
    assert!(lobby.registry().is_empty());
}

#[test]
fn test_participant_leaves_mid_game() {
    let mut lobby = Lobby::default();
    let id = start(&mut lobby);
    lobby.make_move(C1, &id, 0, 0);

    let envelopes = lobby.disconnect(C1);
    assert_eq!(
        envelopes,
        vec![Envelope::new(C2, ServerEvent::OpponentDisconnected {})]
    );
    assert!(lobby.registry().is_empty());

    // The survivor's later disconnect has nothing left to clean up.
    assert!(lobby.disconnect(C2).is_empty());
}

#[test]
fn test_sessions_are_independent() {
    let mut lobby = Lobby::default();
    let first = start(&mut lobby);

    lobby.connect(ConnectionId::new(10));
    let started = lobby.connect(ConnectionId::new(11));
    let second = match &started[0].event {
        ServerEvent::GameStart { session_id, .. } => session_id.clone(),
        other => panic!("Unexpected event: {other:?}"),
    };
    assert_ne!(first, second);

    // A player cannot move in a game they are not seated in.
    assert!(lobby.make_move(C1, &second, 0, 0).is_empty());

    lobby.disconnect(ConnectionId::new(10));
    assert_eq!(lobby.registry().session_ids(), vec![first]);
}
