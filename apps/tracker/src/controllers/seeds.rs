//! Starting data for the in-memory pages. There is no API for these yet.

use chrono::NaiveDate;

use crate::models::email::EmailDirection;
use crate::models::{ContactDraft, EmailDraft};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

pub fn networking_contacts() -> Vec<ContactDraft> {
    vec![
        ContactDraft {
            name: "John Smith".into(),
            title: text("Senior Engineer"),
            company: text("TechCorp Inc."),
            email: text("john.smith@techcorp.com"),
            phone: text("+1 (555) 123-4567"),
            linkedin: text("linkedin.com/in/johnsmith"),
            date_met: date(2025, 1, 10),
            how_met: text("Conference"),
            next_action: text("Follow up on job opportunity"),
            next_action_date: date(2025, 1, 17),
            notes: text("Works in the engineering department, interested in frontend positions"),
        },
        ContactDraft {
            name: "Sarah Johnson".into(),
            title: text("HR Manager"),
            company: text("Global Solutions"),
            email: text("sarah.j@globalsolutions.com"),
            phone: text("+1 (555) 987-6543"),
            linkedin: text("linkedin.com/in/sarahjohnson"),
            date_met: date(2025, 1, 5),
            how_met: text("LinkedIn"),
            next_action: text("Send resume"),
            next_action_date: date(2025, 1, 12),
            notes: text("Hiring manager for frontend developer position"),
        },
        ContactDraft {
            name: "Michael Chen".into(),
            title: text("CTO"),
            company: text("Innovate Startups"),
            email: text("michael@innovate.com"),
            phone: text("+1 (555) 456-7890"),
            linkedin: text("linkedin.com/in/michaelchen"),
            date_met: date(2024, 12, 20),
            how_met: text("Networking event"),
            next_action: text("Schedule coffee chat"),
            next_action_date: date(2025, 1, 20),
            notes: text("Looking for senior developers for new product team"),
        },
    ]
}

pub fn email_log() -> Vec<EmailDraft> {
    vec![
        EmailDraft {
            company: "TechCorp Inc.".into(),
            contact: "john.doe@techcorp.com".into(),
            subject: "Application for Frontend Developer Position".into(),
            date: date(2025, 1, 10),
            direction: EmailDirection::Outbound,
            status: "Read".into(),
            follow_up_date: date(2025, 1, 15),
            notes: text("Initial application sent with resume and cover letter"),
        },
        EmailDraft {
            company: "Innovate Solutions".into(),
            contact: "sarah.smith@innovatesol.com".into(),
            subject: "Follow-up on Application Status".into(),
            date: date(2025, 1, 8),
            direction: EmailDirection::Outbound,
            status: "Delivered".into(),
            follow_up_date: date(2025, 1, 18),
            notes: text("Following up on previous application"),
        },
        EmailDraft {
            company: "Global Systems".into(),
            contact: "hr@globalsystems.com".into(),
            subject: "Interview Confirmation".into(),
            date: date(2025, 1, 5),
            direction: EmailDirection::Inbound,
            status: "Scheduled".into(),
            follow_up_date: date(2025, 1, 12),
            notes: text("Interview scheduled for next week"),
        },
    ]
}
