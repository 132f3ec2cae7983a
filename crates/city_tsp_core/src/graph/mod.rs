mod edge;
mod load;
mod network;
mod node;

pub use edge::{Edge, EdgeKind};
pub use load::{EDGES_FILE, NODES_FILE, TableLayout};
pub use network::CityNetwork;
pub use node::Node;
