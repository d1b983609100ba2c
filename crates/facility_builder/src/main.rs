//! Facility builder
//!
//! Command-line front end: loads a layout table (or uses the built-in
//! research lab) and compiler settings, compiles the scene, logs a summary
//! and optionally writes a RON snapshot of the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::info;

use facility_compiler::foundation::logging;
use facility_compiler::prelude::*;

fn cli() -> Command {
    Command::new("facility_builder")
        .about("Compiles a facility layout into a procedural 3D scene")
        .arg(
            Arg::new("layout")
                .short('l')
                .long("layout")
                .value_name("FILE")
                .help("Layout table (.toml or .ron); defaults to the built-in research lab"),
        )
        .arg(
            Arg::new("settings")
                .short('s')
                .long("settings")
                .value_name("FILE")
                .help("Compiler settings (.toml or .ron)"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Seed for decorative scatter, overrides the settings file")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level when RUST_LOG is unset (error, warn, info, debug, trace)"),
        )
        .arg(
            Arg::new("snapshot")
                .short('o')
                .long("snapshot")
                .value_name("FILE")
                .help("Write the compiled scene as RON"),
        )
        .arg(
            Arg::new("print-default-layout")
                .long("print-default-layout")
                .help("Print the built-in layout as RON and exit")
                .action(ArgAction::SetTrue),
        )
}

fn load_settings(matches: &ArgMatches) -> Result<CompilerSettings> {
    let mut settings = match matches.get_one::<String>("settings") {
        Some(path) => CompilerSettings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {path}"))?,
        None => CompilerSettings::default(),
    };
    if let Some(seed) = matches.get_one::<u64>("seed") {
        settings.seed = *seed;
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        settings.log_level.clone_from(level);
    }
    Ok(settings)
}

fn load_layout(matches: &ArgMatches) -> Result<LayoutSpec> {
    match matches.get_one::<String>("layout") {
        Some(path) => LayoutSpec::load_from_file(path).with_context(|| format!("Failed to load layout from {path}")),
        None => Ok(LayoutSpec::research_lab()),
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    if matches.get_flag("print-default-layout") {
        let text = LayoutSpec::research_lab()
            .to_ron_string()
            .context("Failed to serialise the built-in layout")?;
        println!("{text}");
        return Ok(());
    }

    let settings = load_settings(&matches)?;
    logging::init_with_level(&settings.log_level);

    let layout = load_layout(&matches)?;
    info!(
        "Layout: {} zones, {} edges, {} doors, {} portals, {} staircases",
        layout.zones.len(),
        layout.edges.len(),
        layout.doors.len(),
        layout.portals.len(),
        layout.stairs.len()
    );

    let compiler = FacilityCompiler::new(settings).context("Invalid compiler settings")?;
    let compiled = compiler.compile(&layout).context("Compile failed")?;

    info!(
        "Scene: {} instances, {} tracks, {} LOD groups, {} materials, {} connectors",
        compiled.scene.instance_count(),
        compiled.scene.track_count(),
        compiled.scene.lod_groups().len(),
        compiled.materials.len(),
        compiled.connectors.len()
    );

    if let Some(path) = matches.get_one::<String>("snapshot") {
        let mut exporter = RonSnapshotExporter::new(PathBuf::from(path));
        compiled
            .export_with(&mut exporter)
            .with_context(|| format!("Failed to write snapshot to {path}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn test_overrides_apply_to_defaults() {
        let matches = cli()
            .try_get_matches_from(["facility_builder", "--seed", "9", "--log-level", "debug"])
            .unwrap();
        let settings = load_settings(&matches).unwrap();
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.wall_thickness, CompilerSettings::default().wall_thickness);
    }

    #[test]
    fn test_rejects_bad_seed() {
        assert!(cli().try_get_matches_from(["facility_builder", "--seed", "many"]).is_err());
    }

    #[test]
    fn test_default_layout_without_flag() {
        let matches = cli().try_get_matches_from(["facility_builder"]).unwrap();
        assert_eq!(load_layout(&matches).unwrap(), LayoutSpec::research_lab());
    }

    #[test]
    fn test_missing_settings_file_reports_path() {
        let matches = cli()
            .try_get_matches_from(["facility_builder", "--settings", "does/not/exist.toml"])
            .unwrap();
        let message = format!("{:#}", load_settings(&matches).unwrap_err());
        assert!(message.contains("does/not/exist.toml"));
    }
}
