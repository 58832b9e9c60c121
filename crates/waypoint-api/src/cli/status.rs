//! `waypoint status` -- configuration and credential overview.

use crate::state::AppState;

/// Print the service status: config, credential presence, session count.
pub async fn status(state: &AppState, json: bool) -> anyhow::Result<()> {
    let sessions = state.chat_service.list_sessions().await?;
    let turns_available = state.turn_processor.is_some();
    let search_available = state.search_service.is_some();

    if json {
        let status = serde_json::json!({
            "data_dir": state.data_dir.display().to_string(),
            "model": state.config.model,
            "max_results": state.config.max_results,
            "turns_available": turns_available,
            "search_available": search_available,
            "sessions": sessions.len(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let check_mark = |ok: bool| {
        if ok {
            format!("{}", console::style("✓").green())
        } else {
            format!("{}", console::style("✗").red())
        }
    };

    println!();
    println!(
        "  {} Waypoint status",
        console::style("🗺").bold()
    );
    println!();
    println!("  Data dir:    {}", console::style(state.data_dir.display()).cyan());
    println!("  Model:       {}", console::style(&state.config.model).cyan());
    println!("  Max results: {}", state.config.max_results);
    println!();
    println!("  {} Inference credential (chat turns)", check_mark(turns_available));
    println!("  {} Places credential (search)", check_mark(search_available));
    println!();
    println!("  Active sessions: {}", sessions.len());
    println!();

    Ok(())
}
