use anyhow::{anyhow, bail, Context, Result};
use borrowdesk::context::AppContext;
use borrowdesk::location::FixedPosition;
use borrowdesk::models::{User, UserPatch};
use borrowdesk::precondition::ensure_borrower;
use borrowdesk::resources::{PayFineError, ReactionError};
use borrowdesk::router::{guard, Access, Route};
use borrowdesk::store::StoreError;
use borrowdesk::validation::{
    BorrowingDraft, BorrowingPatch, CardDetails, Credentials, DeviceDraft, DevicePatch,
    FinePayment, PostDraft, PostPatch, Registration, UserUpdate, Validated,
};
use chrono::{Duration, Utc};

use super::args::{
    BorrowingCommand, BorrowingStatusArg, Command, DeviceCommand, DeviceFields, DevicePatchFields,
    PostCommand, UserCommand,
};
use super::render;

/// Attaches the message a user should see on top of the error chain.
trait UserFacing<T> {
    fn user_facing(self) -> Result<T>;
}

impl<T> UserFacing<T> for Result<T, StoreError> {
    fn user_facing(self) -> Result<T> {
        self.map_err(|e| {
            let message = e.user_message();
            anyhow::Error::new(e).context(message)
        })
    }
}

impl<T> UserFacing<T> for Result<T, PayFineError> {
    fn user_facing(self) -> Result<T> {
        self.map_err(|e| {
            let message = e.user_message();
            anyhow::Error::new(e).context(message)
        })
    }
}

impl<T> UserFacing<T> for Result<T, ReactionError> {
    fn user_facing(self) -> Result<T> {
        self.map_err(|e| {
            let message = e.user_message();
            anyhow::Error::new(e).context(message)
        })
    }
}

/// Refuses a command the way the router would refuse the matching page.
fn enter(ctx: &AppContext, route: Route) -> Result<Option<User>> {
    let user = ctx.session.current_user();
    match guard(&route, user.as_ref()) {
        Access::Allow => Ok(user),
        Access::Redirect(Route::Login) => bail!("Please login to open {route}"),
        Access::Redirect(_) => bail!("You do not have access to {route}"),
    }
}

fn signed_in(ctx: &AppContext) -> Result<User> {
    ctx.session
        .current_user()
        .ok_or_else(|| anyhow!("Not signed in. Run `borrowdesk login` first."))
}

fn print_message(message: Option<String>, fallback: &str) {
    println!("{}", message.as_deref().unwrap_or(fallback));
}

pub async fn run(ctx: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let credentials = Validated::new(Credentials::new(email, password))?;
            let user = ctx.session.login(credentials).await.user_facing()?;
            let message = ctx.session.state().message;
            print_message(message, "Signed in");
            print!("{}", render::identity(Some(&user)));
        }
        Command::Register {
            username,
            email,
            password,
            confirm_password,
            role,
        } => {
            let registration = Validated::new(Registration {
                username,
                email,
                password,
                confirm_password,
                role: role.into(),
            })?;
            let message = ctx.session.register(registration).await.user_facing()?;
            print_message(message, "Registered. You can now log in.");
        }
        Command::Logout => {
            ctx.session.logout().user_facing()?;
            println!("Signed out");
        }
        Command::Whoami => {
            print!("{}", render::identity(ctx.session.current_user().as_ref()));
        }
        Command::Devices(command) => devices(ctx, command).await?,
        Command::Borrowings(command) => borrowings(ctx, command).await?,
        Command::Posts(command) => posts(ctx, command).await?,
        Command::Users(command) => users(ctx, command).await?,
        Command::Stats => {
            enter(ctx, Route::Admin)?;
            let stats = ctx.dashboard.stats().await.context("Failed to load stats")?;
            print!("{}", render::stats(&stats));
        }
        Command::Notifications { watch } => notifications(ctx, watch).await?,
        Command::Route { path } => {
            let route = Route::parse(&path).ok_or_else(|| anyhow!("No page at {path}"))?;
            let user = ctx.session.current_user();
            print!("{}", render::access(&path, &guard(&route, user.as_ref())));
        }
    }
    Ok(())
}

fn device_draft(fields: DeviceFields) -> Result<DeviceDraft> {
    let mut draft = DeviceDraft {
        name: fields.name,
        serial_number: fields.serial_number,
        category: fields.category,
        status: fields.status.into(),
        location: fields.location,
        description: fields.description,
        image: fields.image,
        lat: None,
        lng: None,
        purchase_date: fields.purchase_date,
    };
    if fields.share_location {
        draft.share_location(&FixedPosition(fields.position))?;
    }
    Ok(draft)
}

fn device_patch(fields: DevicePatchFields) -> DevicePatch {
    DevicePatch {
        name: fields.name,
        serial_number: fields.serial_number,
        category: fields.category,
        status: fields.status.map(Into::into),
        location: fields.location,
        description: fields.description,
        image: fields.image,
        lat: None,
        lng: None,
    }
}

async fn devices(ctx: &AppContext, command: DeviceCommand) -> Result<()> {
    match command {
        DeviceCommand::List => {
            let devices = ctx.devices.fetch_all().await.user_facing()?;
            print!("{}", render::devices(&devices));
        }
        DeviceCommand::Show { id } => {
            enter(ctx, Route::Device { id: id.clone() })?;
            let device = ctx.devices.fetch_one(&id).await.user_facing()?;
            print!("{}", render::device(&device));
            let reviews = ctx.posts.fetch_for_device(&id).await.user_facing()?;
            let viewer = ctx.session.current_user();
            print!(
                "{}",
                render::posts(&reviews, viewer.as_ref().map(|u| u.id.as_str()))
            );
        }
        DeviceCommand::Search { query, category } => {
            ctx.devices.fetch_all().await.user_facing()?;
            let found = ctx.devices.search(&query, &category).await.user_facing()?;
            print!("{}", render::devices(&found));
            let categories = ctx.devices.categories();
            if !categories.is_empty() {
                println!("Categories: {}", categories.join(", "));
            }
            println!("{} available now", ctx.devices.available().len());
        }
        DeviceCommand::Add(fields) => {
            enter(ctx, Route::Admin)?;
            let draft = Validated::new(device_draft(fields)?)?;
            let device = ctx.devices.create(draft).await.user_facing()?;
            print_message(ctx.devices.state().message, "Device added");
            print!("{}", render::device(&device));
        }
        DeviceCommand::Update { id, fields } => {
            enter(ctx, Route::Admin)?;
            let patch = Validated::new(device_patch(fields))?;
            let updated = ctx.devices.update(&id, patch).await.user_facing()?;
            print_message(ctx.devices.state().message, "Device updated");
            if let Some(device) = updated {
                print!("{}", render::device(&device));
            }
        }
        DeviceCommand::Delete { id } => {
            enter(ctx, Route::Admin)?;
            let message = ctx.devices.remove(&id).await.user_facing()?;
            print_message(message, "Device deleted");
        }
    }
    Ok(())
}

async fn borrowings(ctx: &AppContext, command: BorrowingCommand) -> Result<()> {
    match command {
        BorrowingCommand::List => {
            enter(ctx, Route::Admin)?;
            let all = ctx.borrowings.fetch_all().await.user_facing()?;
            print!("{}", render::borrowings(&all, true));
        }
        BorrowingCommand::Mine => {
            let user = enter(ctx, Route::Borrowings)?;
            let user = user.ok_or_else(|| anyhow!("Not signed in"))?;
            let mine = ctx.borrowings.fetch_for_user(&user.id).await.user_facing()?;
            print!("{}", render::borrowings(&mine, false));
        }
        BorrowingCommand::Request {
            device_id,
            days,
            return_date,
        } => {
            let user = ctx.session.current_user();
            ensure_borrower(user.as_ref())?;
            let device = ctx.devices.fetch_one(&device_id).await.user_facing()?;
            let due = return_date.unwrap_or_else(|| Utc::now() + Duration::days(i64::from(days)));
            let draft =
                Validated::new(BorrowingDraft::request(user.as_ref(), Some(&device), due)?)?;
            ctx.borrowings.create(draft).await.user_facing()?;
            print_message(
                ctx.borrowings.state().message,
                "Borrowing request submitted successfully!",
            );
            ctx.devices.fetch_all().await.user_facing()?;
        }
        BorrowingCommand::Update {
            id,
            status,
            condition_after,
            fine,
            notes,
        } => {
            enter(ctx, Route::Admin)?;
            let returned = matches!(status, Some(BorrowingStatusArg::Returned));
            let patch = Validated::new(BorrowingPatch {
                status: status.map(Into::into),
                actual_return_date: returned.then(Utc::now),
                condition_after,
                fine,
                notes,
            })?;
            ctx.borrowings.update(&id, patch).await.user_facing()?;
            print_message(ctx.borrowings.state().message, "Borrowing updated");
        }
        BorrowingCommand::Delete { id } => {
            enter(ctx, Route::Admin)?;
            let message = ctx.borrowings.remove(&id).await.user_facing()?;
            print_message(message, "Borrowing deleted");
        }
        BorrowingCommand::Pay {
            id,
            cash,
            card_number,
            card_name,
            expiry,
            cvv,
        } => {
            enter(
                ctx,
                Route::Payment {
                    borrowing_id: id.clone(),
                },
            )?;
            let user = signed_in(ctx)?;
            let payment = if cash {
                FinePayment::Cash
            } else {
                FinePayment::Card(CardDetails {
                    number: card_number.unwrap_or_default(),
                    name: card_name.unwrap_or_default(),
                    expiry: expiry.unwrap_or_default(),
                    cvv: cvv.unwrap_or_default(),
                })
            };
            let payment = Validated::new(payment)?;
            ctx.borrowings.fetch_for_user(&user.id).await.user_facing()?;
            ctx.borrowings.pay_fine(&id, payment).await.user_facing()?;
            print_message(ctx.borrowings.state().message, "Payment successful");
        }
    }
    Ok(())
}

async fn posts(ctx: &AppContext, command: PostCommand) -> Result<()> {
    let viewer = ctx.session.current_user();
    match command {
        PostCommand::List { device } => {
            let list = match device {
                Some(device_id) => ctx.posts.fetch_for_device(&device_id).await,
                None => ctx.posts.fetch_all().await,
            }
            .user_facing()?;
            print!(
                "{}",
                render::posts(&list, viewer.as_ref().map(|u| u.id.as_str()))
            );
        }
        PostCommand::Add {
            device_id,
            text,
            rating,
            image,
        } => {
            enter(
                ctx,
                Route::NewPost {
                    device_id: device_id.clone(),
                },
            )?;
            let mut draft = PostDraft::by(viewer.as_ref(), device_id)?;
            draft.text = text;
            draft.rating = rating;
            draft.image = image;
            ctx.posts.create(Validated::new(draft)?).await.user_facing()?;
            print_message(ctx.posts.state().message, "Review posted");
        }
        PostCommand::Update {
            id,
            text,
            rating,
            image,
        } => {
            signed_in(ctx)?;
            let patch = Validated::new(PostPatch { text, rating, image })?;
            ctx.posts.update(&id, patch).await.user_facing()?;
            print_message(ctx.posts.state().message, "Review updated");
        }
        PostCommand::Delete { id } => {
            signed_in(ctx)?;
            let message = ctx.posts.remove(&id).await.user_facing()?;
            print_message(message, "Review deleted");
        }
        PostCommand::Like { id } => {
            ctx.posts.like(&id, viewer.as_ref()).await.user_facing()?;
            print_message(ctx.posts.state().message, "Liked");
        }
        PostCommand::Dislike { id } => {
            ctx.posts.dislike(&id, viewer.as_ref()).await.user_facing()?;
            print_message(ctx.posts.state().message, "Disliked");
        }
    }
    Ok(())
}

async fn users(ctx: &AppContext, command: UserCommand) -> Result<()> {
    let admin = enter(ctx, Route::Admin)?;
    match command {
        UserCommand::List => {
            let all = ctx.users.fetch_all().await.user_facing()?;
            print!("{}", render::users(&all));
        }
        UserCommand::Update {
            id,
            username,
            email,
            role,
            status,
        } => {
            let update = UserUpdate {
                username,
                email,
                role: role.map(Into::into),
                status: status.map(Into::into),
            };
            let local = UserPatch::from(&update);
            ctx.users
                .update(&id, Validated::new(update)?)
                .await
                .user_facing()?;
            if admin.is_some_and(|me| me.id == id) {
                ctx.session.update_local_identity(&local).user_facing()?;
            }
            print_message(ctx.users.state().message, "User updated");
        }
        UserCommand::Delete { id } => {
            let message = ctx.users.remove(&id).await.user_facing()?;
            print_message(message, "User deleted");
        }
    }
    Ok(())
}

async fn notifications(ctx: &AppContext, watch: bool) -> Result<()> {
    let user = signed_in(ctx)?;
    if !watch {
        let list = ctx
            .dashboard
            .notifications(&user.id)
            .await
            .context("Failed to load notifications")?;
        print!("{}", render::notifications(&list));
        return Ok(());
    }

    let poller = ctx.dashboard.watch_notifications(user.id.clone());
    let mut updates = poller.subscribe();
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let latest = updates.borrow_and_update().clone();
                print!("{}", render::notifications(&latest));
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}
