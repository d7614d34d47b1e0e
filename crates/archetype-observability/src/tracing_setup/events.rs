//! Structured log events for cluster lifecycle decisions.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a merge performed by the consolidation loop.
pub fn clusters_merged(
    player_class: &str,
    first: i64,
    second: i64,
    new_cluster_id: i64,
    score: f64,
    forced: bool,
) {
    tracing::info!(
        event = "clusters_merged",
        player_class = %player_class,
        first = first,
        second = second,
        new_cluster_id = new_cluster_id,
        score = score,
        forced = forced,
        "clusters merged"
    );
}

/// Log the end of a class's consolidation loop.
pub fn consolidation_completed(player_class: &str, merges: usize, clusters: usize, stop_reason: &str) {
    tracing::info!(
        event = "consolidation_completed",
        player_class = %player_class,
        merges = merges,
        clusters = clusters,
        stop_reason = %stop_reason,
        "consolidation completed"
    );
}

/// Log a new cluster taking over a previous period's identity.
pub fn archetype_inherited(player_class: &str, cluster_id: i64, external_id: i64, score: f64) {
    tracing::info!(
        event = "archetype_inherited",
        player_class = %player_class,
        cluster_id = cluster_id,
        external_id = external_id,
        score = score,
        "archetype inherited"
    );
}

/// Log why inheritance matching stopped.
pub fn inheritance_stopped(player_class: &str, best_score: Option<f64>, unconsumed: usize) {
    tracing::info!(
        event = "inheritance_stopped",
        player_class = %player_class,
        best_score = ?best_score,
        unconsumed = unconsumed,
        "inheritance stopped"
    );
}

/// Log inherited required cards that some member deck lacks.
pub fn required_cards_unsatisfied(cluster_id: i64, external_id: i64, cards: &[u32]) {
    tracing::warn!(
        event = "required_cards_unsatisfied",
        cluster_id = cluster_id,
        external_id = external_id,
        cards = ?cards,
        "inherited required cards not present in every deck"
    );
}

/// Log an experimental cluster extraction.
pub fn experimental_extracted(player_class: &str, absorbed: usize, observations: u64, threshold: u64) {
    tracing::info!(
        event = "experimental_extracted",
        player_class = %player_class,
        absorbed = absorbed,
        observations = observations,
        threshold = threshold,
        "experimental cluster extracted"
    );
}

/// Log an archetype that would have scored but was gated out.
pub fn classification_near_miss(archetype_id: i64, reason: &str, distance: f64) {
    tracing::debug!(
        event = "classification_near_miss",
        archetype_id = archetype_id,
        reason = %reason,
        distance = distance,
        "classification near miss"
    );
}
