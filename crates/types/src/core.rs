use serde::{Deserialize, Serialize};

/// Role this node runs as.
///
/// The bootstrap sequencer is the first node of a network; it can place its
/// own staking transaction directly into a block because there is no peer to
/// relay it through the transaction pool yet.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    #[serde(rename = "bootstrap-sequencer")]
    BootstrapSequencer,
    #[serde(rename = "sequencer")]
    Sequencer,
    #[serde(rename = "watchtower")]
    WatchTower,
}

impl NodeType {
    /// The participant kind this role registers as in the staking contract.
    ///
    /// The contract has no distinct bootstrap kind, so a bootstrap sequencer
    /// stakes as a plain sequencer.
    pub fn participant_kind(self) -> ParticipantKind {
        match self {
            NodeType::BootstrapSequencer | NodeType::Sequencer => ParticipantKind::Sequencer,
            NodeType::WatchTower => ParticipantKind::WatchTower,
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NodeType::BootstrapSequencer => "bootstrap-sequencer",
            NodeType::Sequencer => "sequencer",
            NodeType::WatchTower => "watchtower",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bootstrap-sequencer" => Ok(NodeType::BootstrapSequencer),
            "sequencer" => Ok(NodeType::Sequencer),
            "watchtower" => Ok(NodeType::WatchTower),
            _ => Err(format!("unknown node type: {:?}", s)),
        }
    }
}

/// Participant kind as known to the staking contract.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ParticipantKind {
    #[serde(rename = "sequencer")]
    Sequencer,
    #[serde(rename = "watchtower")]
    WatchTower,
}

impl std::fmt::Display for ParticipantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ParticipantKind::Sequencer => "sequencer",
            ParticipantKind::WatchTower => "watchtower",
        };
        write!(f, "{}", s)
    }
}

/// Provenance tag recorded with every committed block: which role or path
/// produced it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BlockSource {
    /// Extracted from DA history by the syncer.
    Da,
    BootstrapSequencer,
    Sequencer,
    WatchTower,
}

impl From<NodeType> for BlockSource {
    fn from(node_type: NodeType) -> Self {
        match node_type {
            NodeType::BootstrapSequencer => BlockSource::BootstrapSequencer,
            NodeType::Sequencer => BlockSource::Sequencer,
            NodeType::WatchTower => BlockSource::WatchTower,
        }
    }
}

impl std::fmt::Display for BlockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BlockSource::Da => "da",
            BlockSource::BootstrapSequencer => "bootstrap-sequencer",
            BlockSource::Sequencer => "sequencer",
            BlockSource::WatchTower => "watchtower",
        };
        write!(f, "{}", s)
    }
}
