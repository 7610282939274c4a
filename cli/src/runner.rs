use crate::arg_parser::ArgParser;
use crate::scenario::Scenario;
use crate::settings::Settings;
use anyhow::Context;
use joblib::JobDispatcher;

/// Selector which picks every registered scenario.
pub const ALL: &str = "all";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Phases {
    pub simulate: bool,
    pub graph: bool,
}

/// What a single invocation of the tool is going to do.
#[derive(Debug)]
pub enum Plan<'a> {
    List(Vec<&'a str>),
    Execute {
        scenarios: Vec<&'a Scenario>,
        phases: Phases,
    },
}

pub fn plan<'a>(registry: &'a [Scenario], args: &ArgParser) -> Plan<'a> {
    if args.list {
        return Plan::List(registry.iter().map(|s| s.name.as_str()).collect());
    }
    Plan::Execute {
        scenarios: select(registry, &args.scenarios),
        phases: Phases {
            simulate: args.simulate,
            graph: !args.no_graph,
        },
    }
}

/// Pick the requested scenarios, keeping registration order.
///
/// Names that match nothing are skipped with a warning.
pub fn select<'a>(registry: &'a [Scenario], requested: &[String]) -> Vec<&'a Scenario> {
    let all = requested.iter().any(|name| name == ALL);
    for name in requested {
        if name != ALL && !registry.iter().any(|s| &s.name == name) {
            log::warn!("unknown scenario `{}`, skipping", name);
        }
    }
    registry
        .iter()
        .filter(|s| all || requested.contains(&s.name))
        .collect()
}

pub async fn execute(
    plan: Plan<'_>,
    dispatcher: &JobDispatcher,
    settings: &Settings,
) -> anyhow::Result<()> {
    let (scenarios, phases) = match plan {
        Plan::List(names) => {
            for name in names {
                println!("{}", name);
            }
            return Ok(());
        }
        Plan::Execute { scenarios, phases } => (scenarios, phases),
    };

    for scenario in scenarios {
        log::info!("processing scenario {}", scenario.name);
        if phases.simulate {
            scenario
                .simulate(dispatcher, settings)
                .with_context(|| format!("failed to submit simulations for {}", scenario.name))?;
            let report = dispatcher.drain().await?;
            if !report.is_success() {
                log::warn!(
                    "{}: {} of {} simulations failed",
                    scenario.name,
                    report.failures().count(),
                    report.completed()
                );
            }
            scenario
                .postprocess(settings)
                .await
                .with_context(|| format!("failed to merge results for {}", scenario.name))?;
        }
        if phases.graph {
            scenario.graph(settings).await;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::os::unix::fs::PermissionsExt;

    fn registry() -> Vec<Scenario> {
        vec![
            Scenario::new("alpha", vec![], vec![1], vec![10]),
            Scenario::new("beta", vec![], vec![1], vec![10]),
            Scenario::new("gamma", vec![], vec![1], vec![10]),
        ]
    }

    fn args(argv: &[&str]) -> ArgParser {
        ArgParser::try_parse_from(std::iter::once("sweep").chain(argv.iter().copied()))
            .expect("valid arguments")
    }

    fn names(scenarios: &[&Scenario]) -> Vec<String> {
        scenarios.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn all_selects_every_scenario_in_order() {
        let registry = registry();
        let selected = select(&registry, &["all".to_string()]);
        assert_eq!(names(&selected), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn selection_keeps_registration_order() {
        let registry = registry();
        let selected = select(&registry, &["gamma".to_string(), "alpha".to_string()]);
        assert_eq!(names(&selected), vec!["alpha", "gamma"]);
    }

    #[test]
    fn unknown_names_select_nothing() {
        let registry = registry();
        assert!(select(&registry, &["delta".to_string()]).is_empty());
    }

    #[test]
    fn list_mode_runs_nothing() {
        let registry = registry();
        match plan(&registry, &args(&["--list", "-s", "alpha"])) {
            Plan::List(names) => assert_eq!(names, vec!["alpha", "beta", "gamma"]),
            other => panic!("expected a listing, got {:?}", other),
        }
    }

    #[test]
    fn phases_follow_flags() {
        let registry = registry();
        match plan(&registry, &args(&["beta"])) {
            Plan::Execute { scenarios, phases } => {
                assert_eq!(names(&scenarios), vec!["beta"]);
                assert_eq!(
                    phases,
                    Phases {
                        simulate: false,
                        graph: true
                    }
                );
            }
            other => panic!("expected execution, got {:?}", other),
        }
        match plan(&registry, &args(&["-s", "-g", "all"])) {
            Plan::Execute { phases, .. } => assert_eq!(
                phases,
                Phases {
                    simulate: true,
                    graph: false
                }
            ),
            other => panic!("expected execution, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn simulate_drain_and_merge_end_to_end() {
        let dir = tempfile::tempdir().expect("tempdir");
        let results = dir.path().join("results");
        std::fs::create_dir(&results).expect("results dir");

        // stands in for the simulator: writes every subtype for its run and distance
        let simulator = dir.path().join("fake-sim.sh");
        std::fs::write(
            &simulator,
            format!(
                "#!/bin/sh\n\
                 run=${{1#--run=}}\n\
                 distance=${{2#--distance=}}\n\
                 for t in jump-distance distance in-cache tx; do\n\
                 printf 'H\\nrow-%s-%s\\n' \"$run\" \"$distance\" > '{}'/car-relay-$run-$distance-$t.txt\n\
                 done\n",
                results.display()
            ),
        )
        .expect("write simulator");
        std::fs::set_permissions(&simulator, std::fs::Permissions::from_mode(0o755))
            .expect("chmod");

        let settings = Settings {
            program: simulator.display().to_string(),
            results_dir: results.clone(),
            graphs_dir: dir.path().join("graphs"),
            compressor: "true".into(),
        };
        let registry = vec![Scenario::new("demo", vec![], vec![1, 2], vec![10, 15])];
        let dispatcher = JobDispatcher::spawn(2);

        execute(
            plan(&registry, &args(&["-s", "-g", "demo"])),
            &dispatcher,
            &settings,
        )
        .await
        .expect("execute");
        dispatcher.shutdown().await.expect("shutdown");

        let merged = std::fs::read_to_string(results.join("demo").join("car-relay-tx.txt"))
            .expect("merged table");
        assert_eq!(
            merged,
            "Run\tDistance\tH\n\
             1\t10\trow-1-10\n\
             2\t10\trow-2-10\n\
             1\t15\trow-1-15\n\
             2\t15\trow-2-15\n"
        );
    }
}
