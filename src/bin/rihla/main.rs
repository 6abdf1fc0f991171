//! rihla: command-line explorer for Moroccan schools
//!
//! Usage examples
//! --------------
//!
//! - List regions, or the provinces of one region
//!   $ rihla regions
//!   $ rihla provinces --region Oriental
//!
//! - Search schools, narrowed by facets
//!   $ rihla search --region Fès-Meknès --query lycée
//!
//! - Export the matching schools as CSV
//!   $ rihla export --province Casablanca -o casablanca.csv
//!
//! - Driving routes from a position to a school
//!   $ rihla route 14 --from 33.5731,-7.5898
//!
//! Configuration comes from the `RIHLA_*` environment variables (see
//! `rihla::config`); `--input` and `--from` override the dataset and origin.
mod args;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;

use rihla::config::ExplorerConfig;
use rihla::explorer::ExplorerController;
use rihla::export::export_filename_today;
use rihla::format::route_label;
use rihla::geolocation::{FixedLocation, NoGeolocation};
use rihla::logging::init_logging;
use rihla::osrm::OsrmClient;
use rihla::planner::RoutePhase;
use rihla::school::SchoolId;
use rihla::session::Session;
use rihla::traits::LocationProvider;

use crate::args::{CliArgs, Commands, FilterArgs};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let mut config = ExplorerConfig::from_env()?;
    if let Some(input) = args.input {
        config.dataset = Some(input);
    }
    let schools = config.load_schools()?;
    let mut controller = ExplorerController::new(schools);

    match args.command {
        Commands::Regions => {
            for region in controller.regions() {
                println!("{region}");
            }
        }

        Commands::Provinces { regions } => {
            controller.set_regions(regions);
            for province in controller.available_provinces() {
                println!("{province}");
            }
        }

        Commands::Communes { regions, provinces } => {
            controller.set_regions(regions);
            controller.set_provinces(provinces);
            for commune in controller.available_communes() {
                println!("{commune}");
            }
        }

        Commands::Search(filters) => {
            apply_filters(&mut controller, filters);
            let schools = controller.visible_schools();
            if schools.is_empty() {
                println!("No schools found");
            } else {
                for school in &schools {
                    println!(
                        "{:>5}  {} ({}, {}) - {}, {}, {}",
                        school.id,
                        school.name_latin,
                        school.level,
                        school.school_type,
                        school.commune,
                        school.province,
                        school.region
                    );
                }
                println!("{} school(s)", schools.len());
            }
        }

        Commands::Stats(filters) => {
            apply_filters(&mut controller, filters);
            let stats = controller.statistics();
            println!("Schools: {}", stats.total);
            println!("  Regions: {}", stats.regions);
            println!("  Provinces: {}", stats.provinces);
            println!("  Communes: {}", stats.communes);
            for (level, count) in stats.by_level {
                println!("  {level}: {count}");
            }
        }

        Commands::Export { filters, output } => {
            apply_filters(&mut controller, filters);
            let csv = controller.export_csv()?;
            let path = output.unwrap_or_else(|| PathBuf::from(export_filename_today()));
            if path.as_os_str() == "-" {
                println!("{csv}");
            } else {
                fs::write(&path, csv).with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), count = controller.visible_schools().len(), "exported schools");
            }
        }

        Commands::Route { id, from } => {
            let router = OsrmClient::new(config.osrm.clone()).context("building OSRM client")?;
            let wait = Duration::from_secs(config.osrm.timeout_secs + 5);
            match from.or(config.origin) {
                Some(origin) => plan_route(controller, FixedLocation(origin), router, id, wait)?,
                None => plan_route(controller, NoGeolocation, router, id, wait)?,
            }
        }
    }

    Ok(())
}

fn apply_filters(controller: &mut ExplorerController, filters: FilterArgs) {
    controller.set_regions(filters.regions);
    controller.set_provinces(filters.provinces);
    controller.set_communes(filters.communes);
    controller.set_query(filters.query);
}

fn plan_route<L: LocationProvider>(
    controller: ExplorerController,
    locator: L,
    router: OsrmClient,
    id: SchoolId,
    wait: Duration,
) -> anyhow::Result<()> {
    if controller.school(id).is_none() {
        bail!("no school with id {id}");
    }

    let mut session = Session::new(controller, locator, router);
    session.update(|c| c.request_directions(id));
    if !session.wait_for_routes(wait) {
        bail!("routing service did not answer within {}s", wait.as_secs());
    }

    let controller = session.controller();
    if let Some(school) = controller.selected_school() {
        println!("{} - {}, {}", school.name_latin, school.commune, school.region);
    }

    let planner = controller.planner();
    match planner.phase() {
        RoutePhase::LocationError(err) => {
            println!("Position unknown ({err}); pass --from lat,lng or set RIHLA_ORIGIN");
        }
        RoutePhase::RouteReady { routes, selected, .. } if !routes.is_empty() => {
            for (index, route) in routes.iter().enumerate() {
                let marker = if index == *selected { "*" } else { " " };
                println!(
                    "{marker} {:<14} {:>10} {:>10}",
                    route_label(index),
                    route.formatted_duration(),
                    route.formatted_distance()
                );
            }
        }
        _ => println!("No route found"),
    }

    println!();
    for link in controller.map_links() {
        println!("{:<12} {}", link.app.to_string(), link.url);
    }
    Ok(())
}
