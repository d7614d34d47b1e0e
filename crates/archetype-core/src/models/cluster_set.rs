use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ClassCluster;
use crate::cards::PlayerClass;
use crate::errors::DataError;

/// Ladder format a snapshot was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameFormat {
    #[serde(rename = "FT_STANDARD")]
    Standard,
    #[serde(rename = "FT_WILD")]
    Wild,
}

impl fmt::Display for GameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("FT_STANDARD"),
            Self::Wild => f.write_str("FT_WILD"),
        }
    }
}

/// One period's clustering across every player class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSet {
    pub as_of: DateTime<Utc>,
    pub game_format: GameFormat,
    #[serde(default)]
    pub live_in_production: bool,
    #[serde(default)]
    pub latest: bool,
    pub class_clusters: Vec<ClassCluster>,
}

impl ClusterSet {
    pub fn new(as_of: DateTime<Utc>, game_format: GameFormat, class_clusters: Vec<ClassCluster>) -> Self {
        Self {
            as_of,
            game_format,
            live_in_production: false,
            latest: false,
            class_clusters,
        }
    }

    pub fn get_class_cluster(&self, player_class: PlayerClass) -> Option<&ClassCluster> {
        self.class_clusters
            .iter()
            .find(|cc| cc.player_class == player_class)
    }

    pub fn get_class_cluster_mut(&mut self, player_class: PlayerClass) -> Option<&mut ClassCluster> {
        self.class_clusters
            .iter_mut()
            .find(|cc| cc.player_class == player_class)
    }

    /// Lookup by class name, case-insensitive.
    pub fn get_class_cluster_by_name(&self, name: &str) -> Result<Option<&ClassCluster>, DataError> {
        let player_class: PlayerClass = name.parse()?;
        Ok(self.get_class_cluster(player_class))
    }

    pub fn items(&self) -> impl Iterator<Item = (PlayerClass, &ClassCluster)> {
        self.class_clusters.iter().map(|cc| (cc.player_class, cc))
    }

    pub fn observations(&self) -> u64 {
        self.class_clusters.iter().map(ClassCluster::observations).sum()
    }

    pub fn to_json(&self) -> Result<String, DataError> {
        serde_json::to_string(self).map_err(|e| DataError::Parse {
            what: "cluster set".to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, DataError> {
        serde_json::from_str(json).map_err(|e| DataError::Parse {
            what: "cluster set".to_string(),
            message: e.to_string(),
        })
    }
}

impl fmt::Display for ClusterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClusterSet {} {} - {} classes",
            self.game_format,
            self.as_of.format("%Y-%m-%d"),
            self.class_clusters.len()
        )
    }
}
