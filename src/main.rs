//! Simcheck CLI - Simulation Model Validation
//!
//! This is a demonstration CLI for the simcheck library.

use simcheck::prelude::*;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        return ExitCode::SUCCESS;
    }

    match args[1].as_str() {
        "validate" => {
            if args.len() < 3 {
                eprintln!("Error: Please specify a model file");
                return ExitCode::FAILURE;
            }
            validate_file(&args[2])
        }
        "example" => {
            print_example();
            ExitCode::SUCCESS
        }
        "help" | "--help" | "-h" => {
            print_usage(&args[0]);
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage(&args[0]);
            ExitCode::FAILURE
        }
    }
}

fn print_usage(program: &str) {
    println!("Simcheck - Simulation Model Validation v{}", simcheck::VERSION);
    println!();
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  validate <model.json>  Validate a model definition file");
    println!("  example                Print an example model as JSON");
    println!("  help                   Show this help message");
}

fn validate_file(path: &str) -> ExitCode {
    let model = match load_model(path) {
        Ok(model) => model,
        Err(error) => {
            eprintln!("Error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let mut service = ModelValidationService::new();
    let report = service.validate(&model);

    for message in report.iter() {
        let prefix = match message.severity {
            Severity::Error => "✗",
            Severity::Warning => "!",
            Severity::Info => "·",
        };
        match message.element_id {
            Some(id) => println!("{} [{}] {} ({})", prefix, message.severity, message.text, id),
            None => println!("{} [{}] {}", prefix, message.severity, message.text),
        }
    }

    println!();
    println!(
        "{} error(s), {} warning(s), {} message(s) total",
        report.error_count(),
        report.warning_count(),
        report.len()
    );

    if report.can_convert() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_model(path: &str) -> SimcheckResult<ModelDefinition> {
    let json = std::fs::read_to_string(path)?;
    Ok(ModelDefinition::from_json(&json)?)
}

fn print_example() {
    let mut model = ModelDefinition::new("assembly line");

    let operator = model.add_resource(Resource::new("operator", 2));
    let prep = model.add_activity(
        Activity::new("Prep").with_step(
            OperationStep::new(SimDuration::constant(2.0, PeriodUnit::Minutes))
                .with_requirement(ResourceSetRequest::single(operator, 1)),
        ),
    );
    let pack = model.add_activity(
        Activity::new("Pack")
            .with_step(OperationStep::new(SimDuration::constant(1.0, PeriodUnit::Minutes))),
    );
    model.connect(prep, pack).unwrap();

    let part = model.add_entity(Entity::new("part"));
    model.add_generator(Generator::new(prep, part).with_name("arrivals"));

    match model.to_json() {
        Ok(json) => println!("{}", json),
        Err(error) => eprintln!("Error: {}", error),
    }
}
