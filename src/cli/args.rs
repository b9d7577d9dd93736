use std::path::PathBuf;

use borrowdesk::location::Coordinates;
use borrowdesk::models::{AccountStatus, BorrowingStatus, DeviceStatus, Role};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(name = "borrowdesk", version, about = "Browse, borrow and manage lendable equipment")]
pub struct Cli {
    /// Config file (default: ~/.config/borrowdesk/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the identity
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long, value_enum, default_value_t = RoleArg::Student)]
        role: RoleArg,
    },
    /// Forget the saved identity
    Logout,
    /// Show the signed-in identity
    Whoami,
    #[command(subcommand)]
    Devices(DeviceCommand),
    #[command(subcommand)]
    Borrowings(BorrowingCommand),
    #[command(subcommand)]
    Posts(PostCommand),
    #[command(subcommand)]
    Users(UserCommand),
    /// Show dashboard counters (admin)
    Stats,
    /// Show recent notifications
    Notifications {
        /// Keep polling until interrupted
        #[arg(long)]
        watch: bool,
    },
    /// Show whether the current identity may open a path
    Route { path: String },
}

#[derive(Subcommand, Debug)]
pub enum DeviceCommand {
    List,
    /// Show one device with its reviews
    Show { id: String },
    Search {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = "")]
        category: String,
    },
    Add(DeviceFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: DevicePatchFields,
    },
    Delete { id: String },
}

#[derive(Args, Debug)]
pub struct DeviceFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub serial_number: String,
    #[arg(long)]
    pub category: String,
    #[arg(long, value_enum, default_value_t = DeviceStatusArg::Available)]
    pub status: DeviceStatusArg,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub purchase_date: Option<DateTime<Utc>>,
    /// Tag the device with the current position
    #[arg(long)]
    pub share_location: bool,
    /// Current position as LAT,LNG
    #[arg(long, value_parser = parse_coordinates)]
    pub position: Option<Coordinates>,
}

#[derive(Args, Debug)]
pub struct DevicePatchFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub serial_number: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<DeviceStatusArg>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum BorrowingCommand {
    /// Every borrowing (admin)
    List,
    /// The signed-in user's borrowings
    Mine,
    /// Ask to borrow a device
    Request {
        device_id: String,
        /// Days until return
        #[arg(long, default_value_t = 7, conflicts_with = "return_date")]
        days: u32,
        #[arg(long)]
        return_date: Option<DateTime<Utc>>,
    },
    Update {
        id: String,
        #[arg(long, value_enum)]
        status: Option<BorrowingStatusArg>,
        #[arg(long)]
        condition_after: Option<String>,
        #[arg(long)]
        fine: Option<Decimal>,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete { id: String },
    /// Pay the fine on one of your borrowings
    Pay {
        id: String,
        #[arg(long, conflicts_with_all = ["card_number", "card_name", "expiry", "cvv"])]
        cash: bool,
        #[arg(long, required_unless_present = "cash")]
        card_number: Option<String>,
        #[arg(long, required_unless_present = "cash")]
        card_name: Option<String>,
        /// MM/YY
        #[arg(long, required_unless_present = "cash")]
        expiry: Option<String>,
        #[arg(long, required_unless_present = "cash")]
        cvv: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PostCommand {
    List {
        /// Only reviews of this device
        #[arg(long)]
        device: Option<String>,
    },
    Add {
        device_id: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        image: Option<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        rating: Option<u8>,
        #[arg(long)]
        image: Option<String>,
    },
    Delete { id: String },
    Like { id: String },
    Dislike { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    List,
    Update {
        id: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
        #[arg(long, value_enum)]
        status: Option<AccountStatusArg>,
    },
    Delete { id: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RoleArg {
    Student,
    Staff,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Student => Role::Student,
            RoleArg::Staff => Role::Staff,
            RoleArg::Admin => Role::Admin,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum AccountStatusArg {
    Active,
    Suspended,
}

impl From<AccountStatusArg> for AccountStatus {
    fn from(arg: AccountStatusArg) -> Self {
        match arg {
            AccountStatusArg::Active => AccountStatus::Active,
            AccountStatusArg::Suspended => AccountStatus::Suspended,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DeviceStatusArg {
    Available,
    Borrowed,
    Damaged,
}

impl From<DeviceStatusArg> for DeviceStatus {
    fn from(arg: DeviceStatusArg) -> Self {
        match arg {
            DeviceStatusArg::Available => DeviceStatus::Available,
            DeviceStatusArg::Borrowed => DeviceStatus::Borrowed,
            DeviceStatusArg::Damaged => DeviceStatus::Damaged,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum BorrowingStatusArg {
    Pending,
    Active,
    Returned,
    Overdue,
}

impl From<BorrowingStatusArg> for BorrowingStatus {
    fn from(arg: BorrowingStatusArg) -> Self {
        match arg {
            BorrowingStatusArg::Pending => BorrowingStatus::Pending,
            BorrowingStatusArg::Active => BorrowingStatus::Active,
            BorrowingStatusArg::Returned => BorrowingStatus::Returned,
            BorrowingStatusArg::Overdue => BorrowingStatus::Overdue,
        }
    }
}

fn parse_coordinates(value: &str) -> Result<Coordinates, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| "expected LAT,LNG".to_string())?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("invalid latitude: {e}"))?;
    let lng: f64 = lng.trim().parse().map_err(|e| format!("invalid longitude: {e}"))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err("coordinates out of range".to_string());
    }
    Ok(Coordinates { lat, lng })
}
