use std::{error::Error, process::ExitCode};

use api_types::{
    adjustment::AdjustmentExecute,
    agent_group::{AgentGroupDelete, AgentGroupSave},
    bank_account::{BankAccountDelete, BankAccountSave},
    callback::{CallbackResend, CallbackSave},
    merchant::{MerchantSave, MerchantStatus},
    whitelist::{WhitelistAdd, WhitelistDelete},
};
use backoffice::{
    Command, Completion, Console, ConsoleConfig, ConsoleError, DateRange, Dialogs, Filter,
    HttpTransport, ListPage, Screen,
    screens::{
        adjustment::Adjustments, agent_group::AgentGroups, bank_account::BankAccounts,
        callback::Callbacks, merchant::Merchants, sms_ack, sms_ack::SmsAckLog,
        whitelist::Whitelist,
    },
};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};

use crate::terminal::{TerminalDialogs, TerminalRouter};

mod table;
mod terminal;

type BoxError = Box<dyn Error + Send + Sync>;
type AdminConsole = Console<HttpTransport, TerminalDialogs, TerminalRouter>;

#[derive(Parser, Debug)]
#[command(name = "backoffice_admin")]
#[command(about = "Operator console for the payment back office")]
struct Cli {
    /// TOML settings file; `BACKOFFICE_*` variables override it.
    #[arg(long)]
    config: Option<String>,

    /// Overrides `base_url` from the settings.
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides the log level from the settings.
    #[arg(long)]
    level: Option<String>,

    /// Answer every confirmation with yes.
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    screen: ScreenCommand,
}

#[derive(Subcommand, Debug)]
enum ScreenCommand {
    Merchant(Merchant),
    BankAccount(BankAccount),
    AgentGroup(AgentGroup),
    Whitelist(WhitelistScreen),
    SmsAck(SmsAck),
    Adjustment(Adjustment),
    Callback(Callback),
}

#[derive(Args, Debug, Default)]
struct RangeArgs {
    /// First day, `YYYY-MM-DD`.
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last day, `YYYY-MM-DD`.
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl RangeArgs {
    fn into_range(self) -> Result<Option<DateRange>, ConsoleError> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Ok(Some(DateRange::new(from, to)?)),
            (None, None) => Ok(None),
            _ => Err(ConsoleError::Validation(
                "Please select a date range".to_string(),
            )),
        }
    }
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    #[command(flatten)]
    range: RangeArgs,
    #[arg(long)]
    account: Option<String>,
    #[arg(long)]
    merchant_code: Option<String>,
    #[arg(long)]
    search: Option<String>,
}

impl FilterArgs {
    fn into_filter(self) -> Result<Filter, ConsoleError> {
        Ok(Filter {
            date_range: self.range.into_range()?,
            account: self.account,
            merchant_code: self.merchant_code,
            search: self.search,
        })
    }
}

#[derive(Args, Debug)]
struct Merchant {
    #[command(subcommand)]
    command: MerchantCommand,
}

#[derive(Subcommand, Debug)]
enum MerchantCommand {
    List(FilterArgs),
    Save(MerchantSaveArgs),
}

#[derive(Args, Debug)]
struct MerchantSaveArgs {
    /// Existing merchant to update; omit to create.
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    code: String,
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "active", value_parser = parse_status)]
    status: MerchantStatus,
}

fn parse_status(raw: &str) -> Result<MerchantStatus, String> {
    [MerchantStatus::Active, MerchantStatus::Inactive]
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(raw))
        .ok_or_else(|| format!("unsupported status: {raw}"))
}

#[derive(Args, Debug)]
struct BankAccount {
    #[command(subcommand)]
    command: BankAccountCommand,
}

#[derive(Subcommand, Debug)]
enum BankAccountCommand {
    List(FilterArgs),
    Save(BankAccountSaveArgs),
    Delete(IdArgs),
}

#[derive(Args, Debug)]
struct BankAccountSaveArgs {
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    merchant_code: String,
    #[arg(long)]
    bank_name: String,
    #[arg(long)]
    account_no: String,
    #[arg(long)]
    account_name: String,
}

#[derive(Args, Debug)]
struct IdArgs {
    #[arg(long)]
    id: String,
}

#[derive(Args, Debug)]
struct AgentGroup {
    #[command(subcommand)]
    command: AgentGroupCommand,
}

#[derive(Subcommand, Debug)]
enum AgentGroupCommand {
    List(FilterArgs),
    Save(AgentGroupSaveArgs),
    Delete(IdArgs),
}

#[derive(Args, Debug)]
struct AgentGroupSaveArgs {
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Args, Debug)]
struct WhitelistScreen {
    #[command(subcommand)]
    command: WhitelistCommand,
}

#[derive(Subcommand, Debug)]
enum WhitelistCommand {
    List(FilterArgs),
    Add(WhitelistAddArgs),
    Delete(IdArgs),
}

#[derive(Args, Debug)]
struct WhitelistAddArgs {
    #[arg(long)]
    merchant_code: String,
    #[arg(long)]
    ip: String,
    #[arg(long)]
    remark: Option<String>,
}

#[derive(Args, Debug)]
struct SmsAck {
    #[command(subcommand)]
    command: SmsAckCommand,
}

#[derive(Subcommand, Debug)]
enum SmsAckCommand {
    List(FilterArgs),
}

#[derive(Args, Debug)]
struct Adjustment {
    #[command(subcommand)]
    command: AdjustmentCommand,
}

#[derive(Subcommand, Debug)]
enum AdjustmentCommand {
    List(FilterArgs),
    Execute(AdjustmentExecuteArgs),
}

#[derive(Args, Debug)]
struct AdjustmentExecuteArgs {
    #[arg(long)]
    account: String,
    /// Signed amount, e.g. `-12.50`.
    #[arg(long, allow_hyphen_values = true)]
    amount: String,
    #[arg(long)]
    reason: String,
    /// Adjustments listed afterwards; defaults to today.
    #[command(flatten)]
    range: RangeArgs,
}

#[derive(Args, Debug)]
struct Callback {
    #[command(subcommand)]
    command: CallbackCommand,
}

#[derive(Subcommand, Debug)]
enum CallbackCommand {
    List(FilterArgs),
    Save(CallbackSaveArgs),
    Resend(IdArgs),
}

#[derive(Args, Debug)]
struct CallbackSaveArgs {
    #[arg(long)]
    id: String,
    #[arg(long)]
    url: String,
}

/// Shows validation errors raised while reading arguments, the way the
/// list page shows its own.
fn alerted<T, D: Dialogs>(
    dialogs: &D,
    result: Result<T, ConsoleError>,
) -> Result<T, ConsoleError> {
    result.inspect_err(|err| {
        if let ConsoleError::Validation(message) = err {
            dialogs.alert(message);
        }
    })
}

fn page_filter<D: Dialogs>(dialogs: &D, args: FilterArgs) -> Result<Filter, ConsoleError> {
    alerted(dialogs, args.into_filter())
}

/// Filter for the list shown after an adjustment: the given range, or today.
fn execute_filter<D: Dialogs>(dialogs: &D, range: RangeArgs) -> Result<Filter, ConsoleError> {
    let range = match alerted(dialogs, range.into_range())? {
        Some(range) => range,
        None => {
            let today = Local::now().date_naive();
            DateRange::new(today, today)?
        }
    };
    Ok(Filter::default().with_date_range(range))
}

async fn list<S: Screen>(console: &AdminConsole, filter: FilterArgs) -> Result<(), BoxError> {
    let mut page = ListPage::<S>::new(page_filter(console.dialogs(), filter)?);
    page.refresh(console).await?;
    table::print(&page.grid, None)?;
    Ok(())
}

async fn sms_ack_list(console: &AdminConsole, filter: FilterArgs) -> Result<(), BoxError> {
    let mut page = ListPage::<SmsAckLog>::new(page_filter(console.dialogs(), filter)?);
    page.refresh(console).await?;
    let colors = sms_ack::group_colors(&page.grid);
    table::print(&page.grid, Some(&colors))?;
    Ok(())
}

/// Runs `command` from the screen's list page and shows what follows.
async fn run<S: Screen, C: Command>(
    console: &AdminConsole,
    filter: Filter,
    command: C,
) -> Result<(), BoxError> {
    let mut page = ListPage::<S>::new(filter);
    match page.execute(console, &command).await? {
        Completion::Refreshed(_) => table::print(&page.grid, None)?,
        Completion::Navigated => {}
        Completion::Applied => eprintln!("done; the list could not be refreshed"),
        Completion::Cancelled => eprintln!("cancelled"),
    }
    Ok(())
}

async fn dispatch(console: &AdminConsole, screen: ScreenCommand) -> Result<(), BoxError> {
    match screen {
        ScreenCommand::Merchant(Merchant { command }) => match command {
            MerchantCommand::List(filter) => list::<Merchants>(console, filter).await,
            MerchantCommand::Save(args) => {
                let save = MerchantSave {
                    id: args.id,
                    merchant_code: args.code,
                    merchant_name: args.name,
                    status: args.status,
                };
                run::<Merchants, _>(console, Filter::default(), save).await
            }
        },
        ScreenCommand::BankAccount(BankAccount { command }) => match command {
            BankAccountCommand::List(filter) => list::<BankAccounts>(console, filter).await,
            BankAccountCommand::Save(args) => {
                let save = BankAccountSave {
                    id: args.id,
                    merchant_code: args.merchant_code,
                    bank_name: args.bank_name,
                    account_no: args.account_no,
                    account_name: args.account_name,
                };
                run::<BankAccounts, _>(console, Filter::default(), save).await
            }
            BankAccountCommand::Delete(IdArgs { id }) => {
                run::<BankAccounts, _>(console, Filter::default(), BankAccountDelete { id }).await
            }
        },
        ScreenCommand::AgentGroup(AgentGroup { command }) => match command {
            AgentGroupCommand::List(filter) => list::<AgentGroups>(console, filter).await,
            AgentGroupCommand::Save(args) => {
                let save = AgentGroupSave {
                    id: args.id,
                    group_name: args.name,
                    description: args.description,
                };
                run::<AgentGroups, _>(console, Filter::default(), save).await
            }
            AgentGroupCommand::Delete(IdArgs { id }) => {
                run::<AgentGroups, _>(console, Filter::default(), AgentGroupDelete { id }).await
            }
        },
        ScreenCommand::Whitelist(WhitelistScreen { command }) => match command {
            WhitelistCommand::List(filter) => list::<Whitelist>(console, filter).await,
            WhitelistCommand::Add(args) => {
                let add = WhitelistAdd {
                    merchant_code: args.merchant_code,
                    ip_address: args.ip,
                    remark: args.remark,
                };
                run::<Whitelist, _>(console, Filter::default(), add).await
            }
            WhitelistCommand::Delete(IdArgs { id }) => {
                run::<Whitelist, _>(console, Filter::default(), WhitelistDelete { id }).await
            }
        },
        ScreenCommand::SmsAck(SmsAck {
            command: SmsAckCommand::List(filter),
        }) => sms_ack_list(console, filter).await,
        ScreenCommand::Adjustment(Adjustment { command }) => match command {
            AdjustmentCommand::List(filter) => list::<Adjustments>(console, filter).await,
            AdjustmentCommand::Execute(args) => {
                let filter = execute_filter(console.dialogs(), args.range)?;
                let execute = AdjustmentExecute {
                    account: args.account,
                    amount: args.amount,
                    reason: args.reason,
                };
                run::<Adjustments, _>(console, filter, execute).await
            }
        },
        ScreenCommand::Callback(Callback { command }) => match command {
            CallbackCommand::List(filter) => list::<Callbacks>(console, filter).await,
            CallbackCommand::Save(args) => {
                let save = CallbackSave {
                    id: args.id,
                    callback_url: args.url,
                };
                run::<Callbacks, _>(console, Filter::default(), save).await
            }
            CallbackCommand::Resend(IdArgs { id }) => {
                run::<Callbacks, _>(console, Filter::default(), CallbackResend { id }).await
            }
        },
    }
}

fn load_config(cli: &Cli) -> Result<ConsoleConfig, ConsoleError> {
    let mut config = ConsoleConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(level) = &cli.level {
        config.level = level.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "backoffice={level},backoffice_admin={level}",
            level = config.level
        ))
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "settings loaded");

    let dialogs = TerminalDialogs {
        assume_yes: cli.yes,
    };
    let console = match Console::connect(&config, dialogs, TerminalRouter) {
        Ok(console) => console,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    match dispatch(&console, cli.screen).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Validation and backend messages were already shown as alerts.
            let surfaced = err
                .downcast_ref::<ConsoleError>()
                .is_some_and(ConsoleError::is_surfaced);
            if !surfaced {
                eprintln!("error: {err}");
            }
            ExitCode::FAILURE
        }
    }
}
