//! Plain-text views of store state.

use std::fmt::Write;

use borrowdesk::models::{Borrowing, Device, FineStatus, Notification, Post, Stats, User};
use borrowdesk::router::Access;

pub fn devices(devices: &[Device]) -> String {
    if devices.is_empty() {
        return "No devices found.\n".to_string();
    }
    let mut out = String::new();
    for device in devices {
        let _ = writeln!(
            out,
            "{:<26} {:<28} {:<14} {}",
            device.id, device.name, device.category, device.status
        );
    }
    out
}

pub fn device(device: &Device) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", device.name, device.status);
    let _ = writeln!(out, "  id:       {}", device.id);
    let _ = writeln!(out, "  serial:   {}", device.serial_number);
    let _ = writeln!(out, "  category: {}", device.category);
    if let Some(location) = &device.location {
        let _ = writeln!(out, "  location: {}", location);
    }
    if let Some(at) = device.coordinates() {
        let _ = writeln!(out, "  position: {:.5}, {:.5}", at.lat, at.lng);
    }
    if let Some(description) = &device.description {
        let _ = writeln!(out, "  {}", description);
    }
    out
}

pub fn fine(borrowing: &Borrowing) -> String {
    match borrowing.fine_status() {
        FineStatus::NotRequired => "No fine".to_string(),
        FineStatus::Payable(amount) => format!(
            "Fine {} (pay with `borrowings pay {}`)",
            amount, borrowing.id
        ),
        FineStatus::Settled => "Fine paid".to_string(),
    }
}

pub fn borrowings(borrowings: &[Borrowing], show_borrower: bool) -> String {
    if borrowings.is_empty() {
        return "No borrowings found.\n".to_string();
    }
    let mut out = String::new();
    for b in borrowings {
        let due = b
            .return_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(
            out,
            "{:<26} {:<24} {:<9} due {}",
            b.id,
            b.device_name(),
            b.status,
            due
        );
        if show_borrower {
            let _ = write!(out, "  by {}", b.borrower_name());
        }
        let _ = writeln!(out, "  {}", fine(b));
    }
    out
}

pub fn posts(posts: &[Post], viewer: Option<&str>) -> String {
    if posts.is_empty() {
        return "No reviews yet.\n".to_string();
    }
    let mut out = String::new();
    for post in posts {
        let stars = "*".repeat(usize::from(post.rating.min(5)));
        let _ = writeln!(
            out,
            "{} [{:<5}] {} ({})",
            post.id,
            stars,
            post.author_name(),
            post.device_id
        );
        let _ = writeln!(out, "    {}", post.text);
        let mut reactions = format!("    +{} -{}", post.likes.len(), post.dislikes.len());
        if let Some(viewer) = viewer {
            let mine = post.reaction_of(viewer);
            if mine.liked {
                reactions.push_str("  you liked this");
            }
            if mine.disliked {
                reactions.push_str("  you disliked this");
            }
        }
        let _ = writeln!(out, "{}", reactions);
    }
    out
}

pub fn users(users: &[User]) -> String {
    let mut out = String::new();
    for user in users {
        let _ = writeln!(
            out,
            "{:<26} {:<18} {:<28} {:<8} {}",
            user.id, user.username, user.email, user.role, user.status
        );
    }
    out
}

pub fn identity(user: Option<&User>) -> String {
    match user {
        Some(user) => format!("{} <{}> ({})\n", user.username, user.email, user.role),
        None => "Not signed in.\n".to_string(),
    }
}

pub fn stats(stats: &Stats) -> String {
    format!(
        "Devices:   {} total, {} available\nBorrowings: {} active, {} overdue\n",
        stats.total_devices,
        stats.available_devices,
        stats.active_borrowings,
        stats.overdue_borrowings
    )
}

pub fn notifications(list: &[Notification]) -> String {
    if list.is_empty() {
        return "No new notifications.\n".to_string();
    }
    let mut out = String::new();
    for n in list {
        let when = n
            .timestamp
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default();
        let _ = writeln!(out, "{:>5} {}: {}", when, n.kind.title(), n.message);
    }
    out
}

pub fn access(path: &str, access: &Access) -> String {
    match access {
        Access::Allow => format!("{path}: allowed\n"),
        Access::Redirect(to) => format!("{path}: redirected to {to}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn borrowing(json: &str) -> Borrowing {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn fine_labels() {
        let payable = borrowing(r#"{"_id":"b1","fine":5,"paymentStatus":"Pending"}"#);
        assert_eq!(fine(&payable), "Fine 5 (pay with `borrowings pay b1`)");
        assert_eq!(fine(&borrowing(r#"{"_id":"b2","fine":0}"#)), "No fine");
        assert_eq!(
            fine(&borrowing(r#"{"_id":"b3","fine":5,"paymentStatus":"Paid"}"#)),
            "Fine paid"
        );
    }

    #[test]
    fn borrowing_rows_name_device_and_borrower() {
        let b = borrowing(
            r#"{"_id":"b1","deviceId":[{"_id":"d1","name":"Projector"}],
                "userId":{"_id":"u1","username":"ana"},"status":"Active"}"#,
        );
        let text = borrowings(&[b], true);
        assert!(text.contains("Projector"));
        assert!(text.contains("by ana"));
        assert!(text.contains("No fine"));
    }

    #[test]
    fn empty_lists_say_so() {
        assert_eq!(devices(&[]), "No devices found.\n");
        assert_eq!(notifications(&[]), "No new notifications.\n");
    }
}
