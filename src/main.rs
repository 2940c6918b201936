use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use mediguide_lib::config::AnalyzerConfig;
use mediguide_lib::knowledge::KnowledgeBase;
use mediguide_lib::MediGuide;

#[derive(Parser, Debug)]
#[command(
    name = "mediguide",
    version,
    about = "Analyze medical report text and print analysis, recommendations and an explanation as JSON."
)]
struct Args {
    /// Report text file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Report type hint: blood_test, prescription, x_ray or general.
    report_type: Option<String>,

    /// Question echoed at the top of the explanation.
    #[arg(short, long, default_value = "")]
    query: String,

    /// Knowledge base JSON file to use instead of the resolved one.
    #[arg(long)]
    knowledge_base: Option<PathBuf>,

    /// Collapse duplicate entities whose matches overlap.
    #[arg(long)]
    deduplicate: bool,
}

fn main() -> anyhow::Result<()> {
    mediguide_lib::init_tracing();
    let args = Args::parse();

    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read report from stdin")?;
            buf
        }
    };

    let kb = match &args.knowledge_base {
        Some(path) => KnowledgeBase::load(path)?,
        None => KnowledgeBase::resolve()?,
    };

    let mut config = AnalyzerConfig::from_env();
    if args.deduplicate {
        config.deduplicate_entities = true;
    }

    let guide = MediGuide::new(Arc::new(kb), config)?;
    let bundle = guide.process(Some(&text), args.report_type.as_deref(), &args.query);
    tracing::info!(
        deduplicate = guide.analyzer().config().deduplicate_entities,
        confidence = bundle.analysis.confidence(),
        elapsed_s = bundle.analysis.processing_time_seconds(),
        "Report processed"
    );
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    Ok(())
}
