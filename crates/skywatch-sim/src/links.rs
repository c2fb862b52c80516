//! Data-plane channel endpoints between adjacent workers.
//!
//! One unbounded channel per directed adjacent pair, created once at
//! startup from the topology resolver's output. Each worker ends up
//! owning a small fixed collection of [`NeighborLink`]s — the sender
//! half toward each neighbor and the receiver half back from it. Workers
//! that are not grid-adjacent share no endpoint and can never
//! communicate directly.

use crossbeam_channel::{unbounded, Receiver, Sender};
use indexmap::IndexMap;
use skywatch_core::{DetectionReport, Direction, GridCoord};
use skywatch_grid::GridDims;
use smallvec::SmallVec;

/// One worker's endpoints toward and from a single neighbor.
pub(crate) struct NeighborLink {
    /// Compass direction of the neighbor relative to the owner.
    pub direction: Direction,
    /// The neighbor's grid coordinate.
    pub peer: GridCoord,
    /// Sender half of the owner-to-neighbor channel.
    pub tx: Sender<DetectionReport>,
    /// Receiver half of the neighbor-to-owner channel.
    pub rx: Receiver<DetectionReport>,
}

/// A worker's full link collection, in compass slot order.
pub(crate) type LinkSet = SmallVec<[NeighborLink; 4]>;

/// Build every worker's link set for the given grid, indexed by rank.
///
/// Relies on the topology's neighbor symmetry: for every directed pair
/// `(a, b)` produced while walking `a`'s neighbors, the reverse pair is
/// produced while walking `b`'s.
pub(crate) fn build_links(dims: &GridDims) -> Vec<LinkSet> {
    // Channels keyed by (sender rank, receiver rank).
    let mut senders: IndexMap<(usize, usize), Sender<DetectionReport>> = IndexMap::new();
    let mut receivers: IndexMap<(usize, usize), Receiver<DetectionReport>> = IndexMap::new();
    for rank in 0..dims.cell_count() {
        for (_, peer) in dims.neighbors(dims.coord_of(rank)).present() {
            let (tx, rx) = unbounded();
            senders.insert((rank, dims.rank_of(peer)), tx);
            receivers.insert((rank, dims.rank_of(peer)), rx);
        }
    }

    (0..dims.cell_count())
        .map(|rank| {
            dims.neighbors(dims.coord_of(rank))
                .present()
                .into_iter()
                .map(|(direction, peer)| {
                    let peer_rank = dims.rank_of(peer);
                    NeighborLink {
                        direction,
                        peer,
                        tx: senders
                            .shift_remove(&(rank, peer_rank))
                            .expect("adjacency is symmetric"),
                        rx: receivers
                            .shift_remove(&(peer_rank, rank))
                            .expect("adjacency is symmetric"),
                    }
                })
                .collect()
        })
        .collect()
}
