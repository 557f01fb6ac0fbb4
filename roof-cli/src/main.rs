mod format;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use roof_core::calculations::Estimator;
use roof_core::db::{DbConfig, RepositoryRegistry};
use roof_core::{
    EstimateInput, EstimateResult, Lead, LeadStatus, MaterialCatalog, NewQuote, Project,
    ProjectStatus, Quote, QuoteStatus, RoofingRepository, SolarDetachReset,
    reporting::BusinessMetrics,
};
use roof_db_sqlite::SqliteRepositoryFactory;
use rust_decimal::Decimal;

use crate::format::{format_usd, parse_decimal};

/// Roofing estimate calculator and business record browser.
#[derive(Parser, Debug)]
#[command(name = "roof-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute and print a roof estimate breakdown
    Estimate(EstimateArgs),
    /// List stored records
    List(ListArgs),
    /// Print business metrics for the database
    Report(ReportArgs),
}

#[derive(Parser, Debug)]
struct EstimateArgs {
    /// Flat footprint area in square feet
    #[arg(long, default_value = "2500", value_parser = parse_decimal_arg)]
    area: Decimal,

    /// Base price per roofing square (material and labor)
    #[arg(long, default_value = "785", value_parser = parse_decimal_arg)]
    base_price: Decimal,

    /// Roof pitch as rise per 12 (e.g. 4 for 4/12)
    #[arg(long, default_value_t = 4)]
    pitch: u32,

    /// Extra price per square for steep-slope roofs (pitch 7/12 and up)
    #[arg(long, default_value = "100", value_parser = parse_decimal_arg)]
    surcharge: Decimal,

    /// Material waste percentage
    #[arg(long, default_value = "10", value_parser = parse_decimal_arg)]
    waste: Decimal,

    /// Catalog id of the shingle product (reference pricing only)
    #[arg(long)]
    shingle: Option<String>,

    /// Catalog id of the underlayment product (reference pricing only)
    #[arg(long)]
    underlayment: Option<String>,

    /// Number of solar panels to detach and reset (0 disables the add-on)
    #[arg(long, default_value_t = 0)]
    solar_panels: u32,

    /// Detach & reset price per panel
    #[arg(long, default_value = "150", value_parser = parse_decimal_arg)]
    price_per_panel: Decimal,

    /// Flat cost of electrical upgrade work, when required
    #[arg(long, value_parser = parse_decimal_arg)]
    electrical_upgrade_cost: Option<Decimal>,

    /// Database URL; when given, material prices come from its catalog
    #[arg(long)]
    database: Option<String>,

    /// Save the estimate as a PENDING quote (requires --customer)
    #[arg(long, requires = "customer")]
    save: bool,

    /// Customer name for the saved quote
    #[arg(long)]
    customer: Option<String>,

    /// Quote expiry date for the saved quote (YYYY-MM-DD)
    #[arg(long)]
    valid_until: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RecordKind {
    Leads,
    Projects,
    Quotes,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Which record type to list
    #[arg(value_enum)]
    kind: RecordKind,

    /// Status code filter (e.g. NEW, IN_PROGRESS, ACCEPTED)
    #[arg(long)]
    status: Option<String>,

    /// Case-insensitive substring match over customer name and email
    #[arg(long)]
    search: Option<String>,

    /// Database URL
    #[arg(short, long, default_value = "sqlite:roofing.db?mode=rwc")]
    database: String,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Database URL
    #[arg(short, long, default_value = "sqlite:roofing.db?mode=rwc")]
    database: String,
}

fn parse_decimal_arg(s: &str) -> Result<Decimal, String> {
    parse_decimal(s).map_err(|e| e.to_string())
}

fn backend_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

async fn open_repository(database: &str) -> Result<Box<dyn RoofingRepository>> {
    let config = DbConfig {
        backend: "sqlite".to_string(),
        connection_string: database.to_string(),
    };
    backend_registry()
        .create(&config)
        .await
        .with_context(|| format!("Failed to open database: {}", database))
}

fn print_breakdown(args: &EstimateArgs, result: &EstimateResult) {
    println!("Roof Estimate");
    println!("-------------");
    println!("Footprint area:      {} sq ft", args.area);
    println!(
        "Pitch:               {}/12 ({})",
        args.pitch,
        result.pitch_category.as_str()
    );
    println!("Pitch multiplier:    {}", result.pitch_multiplier.round_dp(4));
    println!("Actual roof area:    {} sq ft", result.actual_roof_area.round_dp(1));
    println!("Squares:             {}", result.squares.round_dp(2));
    if result.material_cost_per_square > Decimal::ZERO {
        println!(
            "Materials (ref):     {} per square",
            format_usd(result.material_cost_per_square)
        );
    }
    println!();
    println!("Base cost:           {}", format_usd(result.base_material_cost));
    if result.pitch_cost_total > Decimal::ZERO {
        println!(
            "Steep surcharge:     {} ({} per square)",
            format_usd(result.pitch_cost_total),
            format_usd(result.active_surcharge)
        );
    }
    println!(
        "Waste ({}%):         {}",
        args.waste,
        format_usd(result.waste_cost)
    );
    if result.solar_total > Decimal::ZERO {
        println!("Solar detach/reset:  {}", format_usd(result.solar_total));
    }
    println!("-------------");
    println!("Total:               {}", format_usd(result.total_cost));
    println!(
        "Price per square:    {}",
        format_usd(result.final_price_per_square)
    );
}

async fn run_estimate(args: EstimateArgs) -> Result<()> {
    let repo = match &args.database {
        Some(database) => Some(open_repository(database).await?),
        None => None,
    };

    let catalog = match &repo {
        Some(repo) => {
            let products = repo
                .list_materials()
                .await
                .context("Failed to load material catalog")?;
            MaterialCatalog::from_products(products)
        }
        None => MaterialCatalog::builtin(),
    };

    let input = EstimateInput {
        footprint_area: args.area,
        base_price_per_square: args.base_price,
        pitch_rise: args.pitch,
        steep_surcharge: args.surcharge,
        waste_factor_percent: args.waste,
        shingle_product: args.shingle.clone(),
        underlayment_product: args.underlayment.clone(),
        solar: if args.solar_panels > 0 {
            SolarDetachReset {
                enabled: true,
                panel_count: args.solar_panels,
                price_per_panel: args.price_per_panel,
                electrical_upgrade: args.electrical_upgrade_cost.is_some(),
                electrical_upgrade_cost: args.electrical_upgrade_cost.unwrap_or(Decimal::ZERO),
            }
        } else {
            SolarDetachReset::none()
        },
    };

    let result = Estimator::new(Some(&catalog)).calculate(&input);
    print_breakdown(&args, &result);

    if args.save {
        let Some(repo) = repo else {
            bail!("--save requires --database");
        };
        let Some(customer) = args.customer.clone() else {
            bail!("--save requires --customer");
        };

        let quote = repo
            .create_quote(NewQuote {
                lead_id: None,
                customer_name: customer,
                valid_until: args.valid_until,
                status: QuoteStatus::Pending,
                roof_area_sf: Some(result.actual_roof_area),
                roof_area_squares: Some(result.squares),
                material_type: args.shingle.clone(),
                material_grade: None,
                labor_rate_per_sq: None,
                material_cost: None,
                labor_cost: None,
                disposal_cost: None,
                total_quote: result.total_cost,
                profit_margin_percent: None,
                deposit_required: None,
                notes: None,
            })
            .await
            .context("Failed to save quote")?;

        println!();
        println!("Saved quote {}", quote.id);
    }

    Ok(())
}

fn matches_search(search: &Option<String>, name: &str, email: Option<&str>) -> bool {
    let Some(needle) = search else {
        return true;
    };
    let needle = needle.to_lowercase();
    name.to_lowercase().contains(&needle)
        || email.is_some_and(|e| e.to_lowercase().contains(&needle))
}

fn print_lead(lead: &Lead) {
    println!(
        "{}  {:<12} {}",
        lead.id,
        lead.status.as_str(),
        lead.customer_name
    );
}

fn print_project(project: &Project) {
    println!(
        "{}  {:<12} {:<24} {}",
        project.id,
        project.status.as_str(),
        project.customer_name,
        format_usd(project.sale_amount)
    );
}

fn print_quote(quote: &Quote) {
    println!(
        "{}  {:<12} {:<24} {}",
        quote.id,
        quote.status.as_str(),
        quote.customer_name,
        format_usd(quote.total_quote)
    );
}

async fn run_list(args: ListArgs) -> Result<()> {
    let repo = open_repository(&args.database).await?;

    match args.kind {
        RecordKind::Leads => {
            let status = args
                .status
                .as_deref()
                .map(|s| {
                    LeadStatus::parse(s)
                        .with_context(|| format!("Unknown lead status '{}'", s))
                })
                .transpose()?;
            let leads = repo.list_leads(status).await.context("Failed to list leads")?;
            for lead in leads
                .iter()
                .filter(|l| matches_search(&args.search, &l.customer_name, l.email.as_deref()))
            {
                print_lead(lead);
            }
        }
        RecordKind::Projects => {
            let status = args
                .status
                .as_deref()
                .map(|s| {
                    ProjectStatus::parse(s)
                        .with_context(|| format!("Unknown project status '{}'", s))
                })
                .transpose()?;
            let projects = repo
                .list_projects(status)
                .await
                .context("Failed to list projects")?;
            for project in projects
                .iter()
                .filter(|p| matches_search(&args.search, &p.customer_name, None))
            {
                print_project(project);
            }
        }
        RecordKind::Quotes => {
            let status = args
                .status
                .as_deref()
                .map(|s| {
                    QuoteStatus::parse(s)
                        .with_context(|| format!("Unknown quote status '{}'", s))
                })
                .transpose()?;
            let quotes = repo
                .list_quotes(status)
                .await
                .context("Failed to list quotes")?;
            for quote in quotes
                .iter()
                .filter(|q| matches_search(&args.search, &q.customer_name, None))
            {
                print_quote(quote);
            }
        }
    }

    Ok(())
}

async fn run_report(args: ReportArgs) -> Result<()> {
    let repo = open_repository(&args.database).await?;

    let quotes = repo.list_quotes(None).await.context("Failed to list quotes")?;
    let projects = repo
        .list_projects(None)
        .await
        .context("Failed to list projects")?;

    let metrics = BusinessMetrics::from_records(&quotes, &projects);

    println!("Business Report");
    println!("---------------");
    println!("Quotes:              {}", metrics.total_quotes);
    println!("Accepted:            {}", metrics.accepted_quotes);
    println!(
        "Conversion rate:     {}%",
        metrics.conversion_rate_percent.round_dp(1)
    );
    println!("Quoted revenue:      {}", format_usd(metrics.total_revenue));
    println!(
        "Material cost:       {}",
        format_usd(metrics.total_material_cost)
    );
    println!(
        "Avg profit margin:   {}%",
        metrics.avg_profit_margin_percent.round_dp(1)
    );
    println!("Open projects:       {}", metrics.open_projects);
    println!("Completed projects:  {}", metrics.completed_projects);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Estimate(args) => run_estimate(args).await,
        Command::List(args) => run_list(args).await,
        Command::Report(args) => run_report(args).await,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn matches_search_is_case_insensitive() {
        let search = Some("gonz".to_string());
        assert!(matches_search(&search, "Maria Gonzalez", None));
        assert!(!matches_search(&search, "Tom Wheeler", None));
    }

    #[test]
    fn matches_search_checks_email() {
        let search = Some("example.com".to_string());
        assert!(matches_search(&search, "Tom Wheeler", Some("tom@example.com")));
        assert!(!matches_search(&search, "Tom Wheeler", None));
    }

    #[test]
    fn no_search_matches_everything() {
        assert!(matches_search(&None, "Anyone", None));
    }

    #[test]
    fn cli_parses_estimate_defaults() {
        let cli = Cli::try_parse_from(["roof-cli", "estimate"]).expect("should parse");
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate subcommand");
        };
        assert_eq!(args.area, Decimal::from(2500));
        assert_eq!(args.base_price, Decimal::from(785));
        assert_eq!(args.pitch, 4);
        assert_eq!(args.surcharge, Decimal::from(100));
        assert_eq!(args.waste, Decimal::from(10));
        assert_eq!(args.solar_panels, 0);
        assert!(!args.save);
    }

    #[test]
    fn cli_accepts_comma_separated_amounts() {
        let cli = Cli::try_parse_from(["roof-cli", "estimate", "--area", "2,500"])
            .expect("should parse");
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate subcommand");
        };
        assert_eq!(args.area, Decimal::from(2500));
    }

    #[test]
    fn save_requires_customer() {
        let result = Cli::try_parse_from(["roof-cli", "estimate", "--save"]);
        assert!(result.is_err());
    }

    #[test]
    fn registry_offers_sqlite_backend() {
        assert_eq!(backend_registry().available_backends(), vec!["sqlite"]);
    }

    #[tokio::test]
    async fn open_repository_routes_through_registered_backend() {
        let repo = open_repository("sqlite::memory:")
            .await
            .expect("should open in-memory database");

        // Migrations ran inside the factory, so queries work immediately.
        let leads = repo.list_leads(None).await.expect("should list leads");
        assert!(leads.is_empty());
    }

    #[test]
    fn cli_parses_list_kind() {
        let cli = Cli::try_parse_from(["roof-cli", "list", "quotes", "--status", "ACCEPTED"])
            .expect("should parse");
        let Command::List(args) = cli.command else {
            panic!("expected list subcommand");
        };
        assert!(matches!(args.kind, RecordKind::Quotes));
        assert_eq!(args.status.as_deref(), Some("ACCEPTED"));
    }
}
