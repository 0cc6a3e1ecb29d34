use crate::infra::{parse_condition, parse_gender, InMemoryAssessmentStore};
use clap::Args;
use std::sync::Arc;
use vaccine_screen::config::AppConfig;
use vaccine_screen::error::AppError;
use vaccine_screen::workflows::assessment::{
    AssessmentInput, AssessmentService, AssessmentServiceError, AssessmentStore,
    AssessmentSubmission, AssessmentWizard, ConditionTag, EligibilityEngine, Gender,
    Recommendation, RuleTable, SaveAssessmentResponse,
};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Age in whole years
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) age: Option<i32>,
    /// male, female or unspecified
    #[arg(long, value_parser = parse_gender)]
    pub(crate) gender: Option<Gender>,
    /// Whether the respondent has had dengue before (yes/no)
    #[arg(long, value_parser = parse_exposure)]
    pub(crate) prior_exposure: Option<bool>,
    /// Declared condition; repeat for several (e.g. --condition chronic_disease)
    #[arg(long = "condition", value_parser = parse_condition)]
    pub(crate) conditions: Vec<ConditionTag>,
    /// Override the configured rule table (extended or minimal)
    #[arg(long, value_parser = parse_rule_table)]
    pub(crate) rule_table: Option<RuleTable>,
    /// Print the recommendation as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Respondent age in whole years
    #[arg(long, default_value_t = 29)]
    pub(crate) age: i32,
    /// Respondent gender
    #[arg(long, value_parser = parse_gender, default_value = "female")]
    pub(crate) gender: Gender,
    /// Whether the respondent has had dengue before (yes/no)
    #[arg(long, value_parser = parse_exposure, default_value = "yes", action = clap::ArgAction::Set)]
    pub(crate) prior_exposure: bool,
    /// Conditions ticked on the checklist, in order
    #[arg(long = "condition", value_parser = parse_condition)]
    pub(crate) conditions: Vec<ConditionTag>,
    /// Optional respondent name stored with the record
    #[arg(long)]
    pub(crate) respondent_name: Option<String>,
    /// Show the recommendation without recording it
    #[arg(long)]
    pub(crate) skip_save: bool,
}

fn parse_exposure(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        _ => Err(format!("expected yes or no, found '{raw}'")),
    }
}

fn parse_rule_table(raw: &str) -> Result<RuleTable, String> {
    RuleTable::parse(raw).ok_or_else(|| format!("expected extended or minimal, found '{raw}'"))
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        age,
        gender,
        prior_exposure,
        conditions,
        rule_table,
        json,
    } = args;

    let mut config = AppConfig::load()?.eligibility;
    if let Some(rule_table) = rule_table {
        config.rule_table = rule_table;
    }
    let engine = EligibilityEngine::new(config);

    let mut input = AssessmentInput {
        age,
        gender,
        prior_exposure,
        conditions,
    };
    input.dedup_conditions();

    let recommendation = engine
        .evaluate(&input)
        .map_err(AssessmentServiceError::from)?;

    if json {
        match serde_json::to_string_pretty(&recommendation) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("Recommendation unavailable as JSON: {err}"),
        }
    } else {
        render_recommendation(&input, &recommendation);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        age,
        gender,
        prior_exposure,
        conditions,
        respondent_name,
        skip_save,
    } = args;

    let config = AppConfig::load()?;
    let store = Arc::new(InMemoryAssessmentStore::default());
    let service = AssessmentService::new(store.clone(), config.eligibility.clone());

    println!("Dengue vaccine screening demo");
    let mut wizard = AssessmentWizard::new();
    print_step(&wizard);
    wizard.set_age(Some(age));
    wizard.set_gender(Some(gender));
    wizard.set_prior_exposure(Some(prior_exposure));
    println!(
        "- age {age}, gender {}, previous dengue infection: {}",
        gender.label(),
        if prior_exposure { "yes" } else { "no" }
    );
    wizard.advance()?;

    print_step(&wizard);
    let conditions = if conditions.is_empty() {
        vec![ConditionTag::None]
    } else {
        conditions
    };
    for tag in conditions {
        let selected = wizard.toggle_condition(tag);
        let labels: Vec<&str> = selected.iter().map(|tag| tag.id()).collect();
        println!("- toggled {tag} -> [{}]", labels.join(", "));
    }
    wizard.advance()?;

    print_step(&wizard);
    let recommendation = wizard.recommendation(service.engine())?;
    let input = wizard.into_input();
    render_recommendation(&input, &recommendation);

    if skip_save {
        return Ok(());
    }

    let response = match service.submit(AssessmentSubmission {
        respondent_name,
        input,
    }) {
        Ok(record) => SaveAssessmentResponse::saved(&record),
        Err(err) => SaveAssessmentResponse::failed(err.to_string()),
    };

    match serde_json::to_string_pretty(&response) {
        Ok(body) => println!("\nSave result:\n{body}"),
        Err(err) => println!("\nSave result unavailable: {err}"),
    }

    if let Some(id) = &response.id {
        match store.fetch(id) {
            Ok(Some(record)) => println!("Stored at {} as {}", record.recorded_at, record.id),
            Ok(None) => println!("Store returned no record for {id}"),
            Err(err) => println!("Store unavailable: {err}"),
        }
    }
    println!("Records held in memory: {}", store.len());

    Ok(())
}

fn print_step(wizard: &AssessmentWizard) {
    println!(
        "\nStep {} of 3: {} ({}%)",
        wizard.step().number(),
        wizard.step().label(),
        wizard.progress_percent()
    );
}

fn render_recommendation(input: &AssessmentInput, recommendation: &Recommendation) {
    println!("\n{}", recommendation.verdict.headline());
    println!("{}", recommendation.reason);
    println!(
        "(severity {:?}, rule {:?})",
        recommendation.severity, recommendation.rule
    );

    println!("\nYour answers");
    match input.age {
        Some(age) => println!("- Age: {age} years"),
        None => println!("- Age: not provided"),
    }
    println!(
        "- Gender: {}",
        input.gender.map(Gender::label).unwrap_or("Not provided")
    );
    if input.conditions.is_empty() {
        println!("- Conditions: not provided");
    } else {
        println!("- Conditions:");
        for tag in &input.conditions {
            println!("  - {}", tag.label());
        }
    }

    println!(
        "\nThis screening is guidance only. Please consult a doctor or healthcare worker for advice suited to your situation."
    );
}
