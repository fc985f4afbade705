use super::resource::Resource;

/// one node of the FrontierNav graph. neighbors are stored as indices
/// into the owning catalog's site table, never as ids; the adjacency is
/// undirected and each edge appears in both endpoints' lists.
#[derive(Debug, Clone)]
pub struct Site {
    pub id: u32,
    pub production: u32,
    pub revenue: u32,
    pub territories: u32,
    pub max_territories: u32,
    pub neighbors: Vec<usize>,
    pub resources: [u32; Resource::COUNT],
}
