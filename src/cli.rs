//! 子命令执行: 每个命令对应原先的一个页面, 错误统一转成面向用户的提示

use anyhow::{anyhow, Context, Result};
use rfp_procure_rust::models::{RfpCreate, RfpStatus, VendorCreate, VendorUpdate};
use rfp_procure_rust::service::dashboard;
use rfp_procure_rust::{ApiClient, AppConfig, ClientError, RfpApi, RfpController, VendorDirectory};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::{Commands, RfpCommand, VendorAction};
use crate::display;

/// watch 命令检查本地视图变化的频率
const WATCH_REFRESH: Duration = Duration::from_secs(1);

pub async fn run(command: Commands, config: &AppConfig) -> Result<()> {
    let client = Arc::new(ApiClient::from_config(config).context("failed to build HTTP client")?);

    match command {
        Commands::Dashboard => {
            let dashboard = dashboard::load(client.as_ref(), client.as_ref())
                .await
                .map_err(|e| report(e, "Failed to load dashboard data"))?;
            print!("{}", display::dashboard(&dashboard));
        }
        Commands::Vendors { action } => run_vendors(action, VendorDirectory::new(client)).await?,
        Commands::Rfps { action } => run_rfps(action, client, config).await?,
    }
    Ok(())
}

async fn run_vendors(action: VendorAction, directory: VendorDirectory) -> Result<()> {
    match action {
        VendorAction::List => {
            let vendors = directory
                .list()
                .await
                .map_err(|e| report(e, "Failed to load vendors"))?;
            print!("{}", display::vendor_table(&vendors));
        }
        VendorAction::Show { id } => {
            let vendor = directory
                .get(id)
                .await
                .map_err(|e| report(e, "Failed to load vendor"))?;
            print!("{}", display::vendor_table(std::slice::from_ref(&vendor)));
        }
        VendorAction::Create {
            name,
            email,
            rating,
        } => {
            let req = VendorCreate {
                vendor_name: name,
                vendor_email: email,
                vendor_rating: rating,
            };
            let vendor = directory
                .create(req)
                .await
                .map_err(|e| report(e, "Failed to create vendor"))?;
            println!("Vendor created successfully (#{})", vendor.vendor_id);
        }
        VendorAction::Update {
            id,
            name,
            email,
            rating,
        } => {
            let req = VendorUpdate {
                vendor_name: name,
                vendor_email: email,
                vendor_rating: rating,
            };
            directory
                .update(id, req)
                .await
                .map_err(|e| report(e, "Failed to update vendor"))?;
            println!("Vendor updated successfully");
        }
        VendorAction::Delete { id } => {
            directory
                .delete(id)
                .await
                .map_err(|e| report(e, "Failed to delete vendor"))?;
            println!("Vendor deleted successfully");
        }
    }
    Ok(())
}

async fn run_rfps(action: RfpCommand, client: Arc<ApiClient>, config: &AppConfig) -> Result<()> {
    let api: Arc<dyn RfpApi> = client;
    let interval = config.poll_interval();

    match action {
        RfpCommand::List => {
            let rfps = api
                .list_rfps()
                .await
                .map_err(|e| report(e, "Failed to load RFPs"))?;
            print!("{}", display::rfp_table(&rfps));
        }
        RfpCommand::Show { id } => {
            let view = open(&api, id, interval).await?;
            view.teardown();
            print!("{}", display::rfp_view(&view.rfp(), &view.responses(), None));
        }
        RfpCommand::Create { title, text, file } => {
            let raw_text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => return Err(anyhow!("either --text or --file is required")),
            };
            let view = RfpController::create(api, RfpCreate::new(title, raw_text))
                .await
                .map_err(|e| report(e, "Failed to create RFP"))?;
            println!("RFP created successfully! AI has parsed your requirements.");
            print!("{}", display::rfp_view(&view.rfp(), &[], None));
        }
        RfpCommand::Delete { id } => {
            api.delete_rfp(id)
                .await
                .map_err(|e| report(e, "Failed to delete RFP"))?;
            println!("RFP deleted successfully");
        }
        RfpCommand::Send { id, vendors } => {
            let view = open(&api, id, interval).await?;
            view.send(&vendors)
                .await
                .map_err(|e| report(e, "Failed to send RFP"))?;
            view.teardown();
            println!("RFP sent to vendor(s) successfully! Status: {}", view.status());
        }
        RfpCommand::Responses { id } => {
            let responses = api
                .list_responses(id)
                .await
                .map_err(|e| report(e, "Failed to load responses"))?;
            print!("{}", display::responses(&responses));
        }
        RfpCommand::Evaluate { id } => {
            let view = open(&api, id, interval).await?;
            let evaluation = view
                .evaluate()
                .await
                .map_err(|e| report(e, "Failed to evaluate RFP"))?;
            view.teardown();
            println!("Evaluation completed!");
            print!(
                "{}",
                display::rfp_view(&view.rfp(), &view.responses(), Some(&evaluation))
            );
        }
        RfpCommand::Watch { id } => watch(&api, id, interval).await?,
    }
    Ok(())
}

async fn open(api: &Arc<dyn RfpApi>, id: i64, interval: Duration) -> Result<RfpController> {
    RfpController::open(api.clone(), id, interval)
        .await
        .map_err(|e| report(e, "Failed to load RFP details"))
}

/// 跟随一个 SENT 状态的 RFP, 有新回复时重新打印, 状态离开 SENT 或 Ctrl-C 时退出
async fn watch(api: &Arc<dyn RfpApi>, id: i64, interval: Duration) -> Result<()> {
    let view = open(api, id, interval).await?;
    print!("{}", display::rfp_view(&view.rfp(), &view.responses(), None));

    if view.status() != RfpStatus::Sent {
        println!("RFP is {}, nothing to poll", view.status());
        return Ok(());
    }
    println!("Polling every {}s, Ctrl-C to stop", interval.as_secs());

    let mut seen = view.revision();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            res = &mut ctrl_c => {
                if let Err(e) = res {
                    warn!("Failed to listen for Ctrl-C: {}", e);
                }
                break;
            }
            _ = tokio::time::sleep(WATCH_REFRESH) => {
                let revision = view.revision();
                if revision != seen {
                    seen = revision;
                    print!("{}", display::responses(&view.responses()));
                }
                if !view.is_polling() {
                    println!("RFP is now {}", view.status());
                    break;
                }
            }
        }
    }
    view.teardown();
    Ok(())
}

fn report(err: ClientError, fallback: &str) -> anyhow::Error {
    if !err.is_local() {
        warn!("{}: {}", fallback, err);
    }
    anyhow!(err.user_message(fallback))
}
