use crate::infra::Pipeline;
use clap::Args;
use enrollment::enrollments::{EnrollmentRequest, WorkerOutcome};
use enrollment::error::AppError;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Lower bound of the age group registered for the demo
    #[arg(long, default_value_t = 18)]
    pub(crate) min_age: u32,
    /// Upper bound of the age group registered for the demo
    #[arg(long, default_value_t = 60)]
    pub(crate) max_age: u32,
    /// Applicant name
    #[arg(long, default_value = "Maria Souza")]
    pub(crate) name: String,
    /// Applicant CPF (punctuation allowed)
    #[arg(long, default_value = "529.982.247-25")]
    pub(crate) cpf: String,
    /// Applicant age
    #[arg(long, default_value_t = 25)]
    pub(crate) age: u32,
    /// Delete the age group after admission to show the worker discarding the request
    #[arg(long)]
    pub(crate) drop_group: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        min_age,
        max_age,
        name,
        cpf,
        age,
        drop_group,
    } = args;

    let pipeline = Pipeline::in_memory("enrollments");
    println!("Enrollment pipeline demo");

    let group = match pipeline.registry.register(min_age, max_age).await {
        Ok(group) => group,
        Err(err) => {
            println!("- Age group rejected [{}]: {}", err.kind().label(), err);
            return Ok(());
        }
    };
    println!("- Registered age group {}", group);

    let accepted = match pipeline
        .service
        .admit(EnrollmentRequest { name, cpf, age })
        .await
    {
        Ok(accepted) => accepted,
        Err(err) => {
            println!("- Enrollment rejected [{}]: {}", err.kind().label(), err);
            return Ok(());
        }
    };
    println!(
        "- Accepted enrollment for {} (age {}) -> id '{}', status {}",
        accepted.name,
        accepted.age,
        accepted.id,
        accepted.status.label()
    );
    println!("  Queue depth: {}", pipeline.queue.len());

    if drop_group {
        if let Err(err) = pipeline.registry.delete(group.id.as_str()).await {
            println!("- Could not remove age group: {}", err);
            return Ok(());
        }
        println!("- Removed age group {} before processing", group.id);
    }

    let outcome = pipeline.worker(Duration::ZERO).process_next().await?;
    let enrollment = match outcome {
        WorkerOutcome::Persisted(enrollment) => enrollment,
        WorkerOutcome::Discarded(reason) => {
            println!("- Worker discarded the request: {:?}", reason);
            return Ok(());
        }
    };
    println!("- Worker persisted enrollment {}", enrollment.id);

    match pipeline.service.status(enrollment.id.as_str()).await {
        Ok(status) => match serde_json::to_string_pretty(&status) {
            Ok(json) => println!("  Status payload:\n{}", json),
            Err(err) => println!("  Status payload unavailable: {}", err),
        },
        Err(err) => println!("  Status lookup failed [{}]: {}", err.kind().label(), err),
    }

    Ok(())
}
