//! List fine-tuning jobs and their tasks
//!
//! Credentials are read from the environment:
//! - QIANFAN_BEARER_TOKEN for the console token
//! - QIANFAN_CONSOLE_BASE_URL to point at another console (optional)
//!
//! Usage:
//!   QIANFAN_BEARER_TOKEN=... cargo run --example list_jobs

use qianfan_finetune::consts::TrainMode;
use qianfan_finetune::{FineTune, JobListOptions, TaskListOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    if std::env::var("QIANFAN_BEARER_TOKEN").is_err() {
        eprintln!("Warning: QIANFAN_BEARER_TOKEN not set. The console will reject the request.");
    }

    let finetune = FineTune::from_env()?;
    let v2 = finetune.v2();

    let jobs = v2
        .job_list(JobListOptions {
            train_mode: Some(TrainMode::Sft.into()),
            max_keys: Some(10),
            ..Default::default()
        })
        .await?;

    let empty = Vec::new();
    let listed = jobs.result()["jobs"].as_array().unwrap_or(&empty);
    println!("{} SFT job(s)", listed.len());

    for job in listed {
        let Some(job_id) = job["jobId"].as_str() else {
            continue;
        };
        println!("- {} ({})", job_id, job["name"]);

        let tasks = v2.task_list(job_id, TaskListOptions::default()).await?;
        if let Some(tasks) = tasks.result()["tasks"].as_array() {
            for task in tasks {
                println!("    {} {}", task["taskId"], task["runStatus"]);
            }
        }
    }

    Ok(())
}
