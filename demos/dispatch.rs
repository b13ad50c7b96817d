use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::fmt;

use edgematch::engine::Engine;

const NODES: [&str; 5] = ["0", "1", "2", "3", "4"];
const EDGE_NODES: [&str; 2] = ["edgeA", "edgeB"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    fmt()
        .with_max_level(tracing::Level::INFO)
        .with_span_events(fmt::format::FmtSpan::ENTER | fmt::format::FmtSpan::CLOSE)
        .with_target(false)
        .with_ansi(false)
        .init();

    let engine = Engine::with_rng(StdRng::seed_from_u64(42));
    engine.setup(128)?;
    info!(
        system_key = %engine.system_fingerprint()?,
        "system initialized"
    );

    for id in NODES {
        let registration = engine.register(id)?;
        info!(node = id, fingerprint = %registration.fingerprint, "node registered");
    }

    let group = engine.create_group(&NODES)?;
    info!(group_id = %group, members = NODES.len(), "group created");

    // Two work items: E1 tagged "observe", E2 tagged "patrol"
    let e1 = engine.encapsulate("observe", &group)?.to_json()?;
    let e2 = engine.encapsulate("patrol", &group)?.to_json()?;
    info!(record = %e1, "encapsulated E1");
    info!(record = %e2, "encapsulated E2");

    let trapdoor = engine.generate_trapdoor("observe", &group)?;
    info!(trapdoor = %trapdoor, "trapdoor issued");

    info!(
        e1 = engine.verify_match(&trapdoor, &e1)?,
        e2 = engine.verify_match(&trapdoor, &e2)?,
        "match results"
    );

    // E2 is served by edgeA and E1 by edgeB, so the "observe" trapdoor lands on edgeB
    let chosen = engine.allocate(&trapdoor, &[e2, e1], &EDGE_NODES)?;
    match chosen {
        Some(node) => info!(edge_node = %node, "work allocated"),
        None => info!("no matching work item"),
    }

    info!(stats = ?engine.stats()?, "done");
    Ok(())
}
