// src/cli.rs

use crate::analysis::anomaly::detect_anomalies;
use crate::analysis::curve::generate_cost_curve;
use crate::analysis::restock::recommend_restock;
use crate::config::{AnalysisConfig, ForecastMethod};
use crate::error::EoqResult;
use crate::io::{demand, inventory, reporting};
use crate::simulation::engine::ReplenishmentSimulation;
use crate::strategy::optimization::{critical_ratio, economic_order_quantity, reorder_point};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "inventory-optimizer", version, about = "EOQ, reorder point and demand forecasting toolkit")]
pub struct Cli {
    /// YAML file with analysis parameters; flags override it.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Export the command's table to this CSV file.
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sweep order quantities and tabulate holding, ordering and total cost.
    Curve(CurveArgs),
    /// Closed-form economic order quantity.
    Eoq(CostArgs),
    /// Reorder point and safety stock.
    Reorder(ReorderArgs),
    /// Forecast demand from the configured history.
    Forecast(ForecastArgs),
    /// Run a (Q, R) replenishment policy against simulated demand.
    Simulate(SimulateArgs),
    /// Flag unusual stock movements read from a CSV file.
    Anomalies(AnomalyArgs),
    /// Prioritised restocking plan for SKUs read from a CSV file.
    Restock(RestockArgs),
}

#[derive(Debug, Args, Default)]
pub struct CostArgs {
    #[arg(long)]
    pub annual_demand: Option<f64>,
    #[arg(long)]
    pub holding_cost: Option<f64>,
    #[arg(long)]
    pub order_cost: Option<f64>,
}

#[derive(Debug, Args)]
pub struct CurveArgs {
    #[command(flatten)]
    pub cost: CostArgs,
    #[arg(long)]
    pub start: Option<f64>,
    #[arg(long)]
    pub end: Option<f64>,
    #[arg(long)]
    pub step: Option<f64>,
}

#[derive(Debug, Args)]
pub struct ReorderArgs {
    #[arg(long)]
    pub daily_demand: Option<f64>,
    #[arg(long)]
    pub std_dev: Option<f64>,
    #[arg(long)]
    pub lead_time: Option<f64>,
    #[arg(long)]
    pub service_level: Option<f64>,
}

#[derive(Debug, Args)]
pub struct ForecastArgs {
    #[arg(long, value_enum)]
    pub method: Option<ForecastMethod>,
    #[arg(long)]
    pub horizon: Option<usize>,
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct SimulateArgs {
    #[arg(long)]
    pub periods: Option<usize>,
    #[arg(long)]
    pub mean_demand: Option<f64>,
    #[arg(long)]
    pub demand_std_dev: Option<f64>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Q; defaults to the configured order quantity.
    #[arg(long)]
    pub order_quantity: Option<u32>,
    /// R; defaults to the configured reorder point.
    #[arg(long)]
    pub reorder_point: Option<u32>,
}

#[derive(Debug, Args)]
pub struct AnomalyArgs {
    /// CSV with columns `label,stock_change`.
    pub input: PathBuf,
    /// Absolute z-score above which a movement is flagged.
    #[arg(long, default_value_t = 2.0)]
    pub threshold: f64,
}

#[derive(Debug, Args)]
pub struct RestockArgs {
    /// CSV with columns `sku,on_hand,reorder_point,eoq`.
    pub input: PathBuf,
}

fn override_with<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

impl Cli {
    pub fn load_config(&self) -> EoqResult<AnalysisConfig> {
        match &self.config {
            Some(path) => {
                info!(path = %path.display(), "loading configuration");
                AnalysisConfig::load(path)
            }
            None => Ok(AnalysisConfig::default()),
        }
    }

    pub fn run(self) -> EoqResult<()> {
        let mut config = self.load_config()?;

        match self.command {
            Command::Curve(args) => {
                apply_cost_args(&mut config, args.cost);
                override_with(&mut config.sweep.start, args.start);
                override_with(&mut config.sweep.end, args.end);
                override_with(&mut config.sweep.step, args.step);

                let curve = generate_cost_curve(&config.eoq, &config.sweep)?;
                let closed_form = economic_order_quantity(&config.eoq)?;
                reporting::print_cost_curve_summary(&curve, Some(&closed_form));

                if let Some(path) = &self.output {
                    reporting::write_cost_curve(path, &curve)?;
                }
            }
            Command::Eoq(args) => {
                apply_cost_args(&mut config, args);
                let eoq = economic_order_quantity(&config.eoq)?;
                println!("Economic order quantity: {:.2} units", eoq.quantity);
                println!("Orders per year:         {:.2}", eoq.orders_per_year);
                println!("Cycle length:            {:.1} days", eoq.cycle_days);
                println!("Minimum annual cost:     ${:.2}", eoq.total_cost);
            }
            Command::Reorder(args) => {
                override_with(&mut config.reorder.daily_demand, args.daily_demand);
                override_with(&mut config.reorder.demand_std_dev, args.std_dev);
                override_with(&mut config.reorder.lead_time_days, args.lead_time);
                override_with(&mut config.reorder.service_level, args.service_level);

                let rop = reorder_point(&config.reorder)?;
                println!("Lead-time demand: {:.1} units", rop.lead_time_demand);
                println!("Safety stock:     {:.1} units", rop.safety_stock);
                println!("Reorder point:    {:.1} units", rop.reorder_point);
            }
            Command::Forecast(args) => {
                override_with(&mut config.forecast.method, args.method);
                override_with(&mut config.forecast.horizon, args.horizon);
                override_with(&mut config.forecast.seed, args.seed);

                let mut model = config.forecast.build_model()?;
                let points = model.forecast(&config.forecast.history, config.forecast.horizon)?;

                println!("Forecast ({}):", model.name());
                for p in &points {
                    println!(
                        "  t+{:<3} {:>8.1}  [{:.1}, {:.1}]",
                        p.period, p.predicted, p.lower, p.upper
                    );
                }

                if let Some(path) = &self.output {
                    reporting::write_forecast(path, &points)?;
                }
            }
            Command::Simulate(args) => {
                let sim_config = &mut config.simulation;
                override_with(&mut sim_config.periods, args.periods);
                override_with(&mut sim_config.order_quantity, args.order_quantity);
                override_with(&mut sim_config.reorder_point, args.reorder_point);
                override_with(&mut sim_config.demand_mean, args.mean_demand);
                override_with(&mut sim_config.demand_std_dev, args.demand_std_dev);
                override_with(&mut sim_config.demand_seed, args.seed);

                let schedule = demand::generate_normal_demand(
                    sim_config.periods,
                    sim_config.demand_mean,
                    sim_config.demand_std_dev,
                    sim_config.demand_seed,
                )?;

                let service_level = critical_ratio(sim_config.shortage_cost, sim_config.holding_cost);
                info!(service_level, "newsvendor service level for these costs");

                let mut sim = ReplenishmentSimulation::new(sim_config.clone(), schedule)?;
                println!(
                    "Running (Q={}, R={}) for {} periods...",
                    sim_config.order_quantity, sim_config.reorder_point, sim_config.periods
                );
                sim.run();

                println!("\n=== Cost Analysis ===");
                println!("Orders placed:    {}", sim.orders_placed());
                println!("Stock-out periods: {}", sim.stockout_periods());
                println!("Fill rate:        {:.1}%", sim.fill_rate() * 100.0);
                println!("Total cost:       ${:.2}", sim.total_cost());

                if let Some(path) = &self.output {
                    reporting::write_simulation_log(path, &sim.history)?;
                }
            }
            Command::Anomalies(args) => {
                let movements = inventory::read_stock_movements(&args.input)?;
                let verdicts = detect_anomalies(&movements, args.threshold)?;

                for v in verdicts.iter().filter(|v| v.is_anomaly) {
                    println!("{:<12} {:>+10.1}  z = {:+.2}", v.label, v.stock_change, v.z_score);
                }
                println!(
                    "{} of {} movements flagged",
                    verdicts.iter().filter(|v| v.is_anomaly).count(),
                    verdicts.len()
                );

                if let Some(path) = &self.output {
                    reporting::write_anomalies(path, &verdicts)?;
                }
            }
            Command::Restock(args) => {
                let items = inventory::read_sku_status(&args.input)?;
                let plan = recommend_restock(&items)?;

                if plan.is_empty() {
                    println!("All SKUs above their reorder point.");
                }
                for rec in &plan {
                    println!("{:<12} {:<7} {:>6} units", rec.sku, rec.priority, rec.recommended_quantity);
                }

                if let Some(path) = &self.output {
                    reporting::write_restock_plan(path, &plan)?;
                }
            }
        }
        Ok(())
    }
}

fn apply_cost_args(config: &mut AnalysisConfig, args: CostArgs) {
    override_with(&mut config.eoq.annual_demand, args.annual_demand);
    override_with(&mut config.eoq.holding_cost_per_unit, args.holding_cost);
    override_with(&mut config.eoq.cost_per_order, args.order_cost);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_curve_overrides() {
        let cli = Cli::try_parse_from([
            "inventory-optimizer",
            "curve",
            "--annual-demand",
            "1200",
            "--step",
            "10",
        ])
        .unwrap();
        match cli.command {
            Command::Curve(args) => {
                assert_eq!(args.cost.annual_demand, Some(1200.0));
                assert_eq!(args.step, Some(10.0));
                assert_eq!(args.start, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parses_forecast_method() {
        let cli = Cli::try_parse_from([
            "inventory-optimizer",
            "-vv",
            "forecast",
            "--method",
            "moving-average",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Command::Forecast(ForecastArgs { method: Some(ForecastMethod::MovingAverage), .. })
        ));
    }

    #[test]
    fn test_invalid_parameters_surface_as_errors() {
        let cli = Cli::try_parse_from(["inventory-optimizer", "eoq", "--annual-demand", "0"]).unwrap();
        assert!(cli.run().is_err());
    }

    #[test]
    fn test_restock_reads_and_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("skus.csv");
        let output = dir.path().join("plan.csv");
        std::fs::write(
            &input,
            "sku,on_hand,reorder_point,eoq\nSKU-321,70,100,80\nSKU-501,10,100,150\nSKU-777,400,100,60\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "inventory-optimizer",
            "restock",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();
        cli.run().unwrap();

        let plan = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = plan.lines().collect();
        assert_eq!(lines[0], "sku,priority,recommended_quantity");
        assert_eq!(lines[1], "SKU-501,High,150");
        assert_eq!(lines[2], "SKU-321,Medium,80");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_simulate_demand_comes_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("inventory.yaml");
        let output = dir.path().join("history.csv");
        std::fs::write(
            &config_path,
            "simulation:\n  periods: 4\n  demand_mean: 20\n  demand_std_dev: 0\n  demand_seed: 3\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "inventory-optimizer",
            "-c",
            config_path.to_str().unwrap(),
            "simulate",
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();
        cli.run().unwrap();

        let mut rdr = csv::Reader::from_path(&output).unwrap();
        let demands: Vec<u32> = rdr
            .records()
            .map(|r| r.unwrap()[1].parse().unwrap())
            .collect();
        assert_eq!(demands, vec![20, 20, 20, 20]);
    }

    #[test]
    fn test_curve_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.csv");
        let cli = Cli::try_parse_from([
            "inventory-optimizer",
            "curve",
            "--output",
            path.to_str().unwrap(),
        ])
        .unwrap();
        cli.run().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 32);
    }
}
