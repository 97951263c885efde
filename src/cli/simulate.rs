use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::agents::{simulator, AgentId, RowRecord};
use crate::cli::commands::SimulateArgs;
use crate::config::SimulationConfig;
use crate::errors::DentalError;

pub async fn handle_simulate(args: SimulateArgs) -> Result<(), DentalError> {
    let agent: AgentId = args.agent.parse()?;
    let row_count = args.rows.unwrap_or_else(|| SimulationConfig::default().rows_for(agent));
    simulator::validate_row_count(row_count)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let rows = simulator::generate(agent, row_count, &mut rng)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render_rows(&rows));
    }
    Ok(())
}

/// One block of `key: value` lines per row, blank line between rows.
pub fn render_rows(rows: &[RowRecord]) -> String {
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        out.push_str(&format!("#{}\n", i + 1));
        for (key, value) in row.fields() {
            if !value.is_empty() {
                out.push_str(&format!("  {:<10} {}\n", format!("{}:", key), value));
            }
        }
        out.push('\n');
    }
    out
}
