use crate::game::state::State;

/// Count move sequences of length `depth` from `state`.
///
/// Refills are random, so a move that ends the round is a leaf: the count
/// stays deterministic for any position.
pub fn perft(state: &State, depth: u32) -> u64 {
    if depth == 0 || state.is_terminal() { return 1; }
    let moves = state.moves();
    if depth == 1 { return moves.len() as u64; }
    let mut nodes = 0u64;
    for &mv in &moves {
        if state.ends_round(mv) {
            nodes += 1;
            continue;
        }
        let mut child = *state;
        child.step(mv);
        nodes += perft(&child, depth - 1);
    }
    nodes
}

/// Per-root-move counts, in move generation order.
pub fn perft_divide(state: &State, depth: u32) -> Vec<(crate::game::moves::Move, u64)> {
    let mut out = Vec::new();
    for &mv in &state.moves() {
        let n = if depth <= 1 || state.ends_round(mv) {
            1
        } else {
            let mut child = *state;
            child.step(mv);
            perft(&child, depth - 1)
        };
        out.push((mv, n));
    }
    out
}
