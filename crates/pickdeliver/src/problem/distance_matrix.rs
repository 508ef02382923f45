use crate::problem::{location::Location, node::NodeIdx};

pub type Distance = f64;

/// Distances between every pair of nodes, stored flat.
/// The entry for a pair is found at `from * num_nodes + to`.
pub struct DistanceMatrix {
    distances: Vec<Distance>,
    num_nodes: usize,
}

impl DistanceMatrix {
    pub fn from_euclidean<'a>(
        locations: impl ExactSizeIterator<Item = &'a Location> + Clone,
    ) -> Self {
        let num_nodes = locations.len();
        let mut distances: Vec<Distance> = vec![0.0; num_nodes * num_nodes];

        for (i, from) in locations.clone().enumerate() {
            for (j, to) in locations.clone().enumerate() {
                distances[i * num_nodes + j] = from.euclidean_distance(to);
            }
        }

        DistanceMatrix {
            distances,
            num_nodes,
        }
    }

    #[inline(always)]
    fn index(&self, from: NodeIdx, to: NodeIdx) -> usize {
        from.get() * self.num_nodes + to.get()
    }

    #[inline(always)]
    pub fn travel_distance(&self, from: NodeIdx, to: NodeIdx) -> Distance {
        if from == to {
            return 0.0;
        }

        self.distances[self.index(from, to)]
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }
}
