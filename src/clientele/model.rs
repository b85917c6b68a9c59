use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::{ClienteleError, Result};
use crate::normalize::normalize_name;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern")
});

/// A single requested service. Immutable once created; owned by its [`Client`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub description: String,
    /// `YYYY-MM-DD HH:MM:SS`, or `None` when a stored record carried no
    /// timestamp for the line. We never substitute the load time: that would
    /// rewrite history on every reload.
    pub requested_at: Option<String>,
}

impl Service {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            requested_at: Some(Local::now().format(DATETIME_FORMAT).to_string()),
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.requested_at {
            Some(ts) => write!(f, "{} ({})", self.description, ts),
            None => write!(f, "{} (date unknown)", self.description),
        }
    }
}

/// A client record: contact details plus an append-only service history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub client_id: String,
    pub registered_on: String,
    pub services: Vec<Service>,
}

impl Client {
    /// Construct and validate a client. Inputs are trimmed first; rules are
    /// checked in order name → phone → email and the first failure wins. On
    /// success the phone is rewritten to its bare 10-digit form.
    pub fn new(name: &str, phone: &str, email: &str) -> Result<Self> {
        let name = name.trim().to_string();
        let phone = phone.trim().to_string();
        let email = email.trim().to_string();

        if name.chars().count() < 2 {
            return Err(ClienteleError::Validation {
                field: "name",
                value: name,
                reason: "must have at least 2 characters",
            });
        }

        let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != 10 {
            return Err(ClienteleError::Validation {
                field: "phone",
                value: phone,
                reason: "must contain exactly 10 digits",
            });
        }

        if !EMAIL_RE.is_match(&email) {
            return Err(ClienteleError::Validation {
                field: "email",
                value: email,
                reason: "is not a valid email address",
            });
        }

        Ok(Self {
            name,
            phone: digits,
            email,
            client_id: String::new(),
            registered_on: Local::now().format(DATE_FORMAT).to_string(),
            services: Vec::new(),
        })
    }

    /// Storage and cache key derived from the display name.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Generate a `<initials>_<YYYYMMDDHHMMSS>` id. Called once, at creation
    /// flow time; records loaded from storage keep their stored id.
    pub fn generate_client_id(&self) -> String {
        let mut initials: String = self
            .name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect();
        if initials.chars().count() < 2 {
            // Pad from the name's first two characters, then cap at two.
            initials.extend(self.name.chars().take(2).flat_map(|c| c.to_uppercase()));
            initials = initials.chars().take(2).collect();
        }
        let timestamp = Local::now().format("%Y%m%d%H%M%S");
        format!("{}_{}", initials, timestamp)
    }

    /// Append a service with the current timestamp.
    pub fn add_service(&mut self, description: &str) -> Result<()> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ClienteleError::Validation {
                field: "service_description",
                value: description.to_string(),
                reason: "must not be empty",
            });
        }
        self.services.push(Service::new(description));
        Ok(())
    }

    /// Render the record in its on-disk text form: labeled lines, then one
    /// `- description (timestamp)` line per service in insertion order. A
    /// service with no known timestamp is written without parentheses.
    pub fn to_file_format(&self) -> String {
        let mut lines = vec![
            format!("Name: {}", self.name),
            format!("ClientID: {}", self.client_id),
            format!("Phone: {}", self.phone),
            format!("Correo: {}", self.email),
            format!("RegisteredOn: {}", self.registered_on),
            "Services:".to_string(),
        ];
        for service in &self.services {
            match &service.requested_at {
                Some(ts) => lines.push(format!("- {} ({})", service.description, ts)),
                None => lines.push(format!("- {}", service.description)),
            }
        }
        lines.join("\n")
    }

    /// Parse the on-disk text form back into a client.
    ///
    /// Labeled lines may appear in any order, except that the `Services:`
    /// header must precede the service lines. Each service line is split on
    /// its last `(`…`)` pair; a line without one yields a service whose
    /// timestamp is unknown. The record is rebuilt through the validating
    /// constructor, then `client_id` and `registered_on` are restored
    /// verbatim.
    pub fn from_file_format(text: &str) -> Result<Self> {
        let mut name = "";
        let mut phone = "";
        let mut email = "";
        let mut client_id = "";
        let mut registered_on = "";
        let mut in_services = false;
        let mut services = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix("Name:") {
                name = rest.trim();
            } else if let Some(rest) = line.strip_prefix("ClientID:") {
                client_id = rest.trim();
            } else if let Some(rest) = line.strip_prefix("Phone:") {
                phone = rest.trim();
            } else if let Some(rest) = line
                .strip_prefix("Correo:")
                .or_else(|| line.strip_prefix("Email:"))
            {
                email = rest.trim();
            } else if let Some(rest) = line.strip_prefix("RegisteredOn:") {
                registered_on = rest.trim();
            } else if line == "Services:" {
                in_services = true;
            } else if in_services {
                if let Some(entry) = line.strip_prefix("- ") {
                    services.push(parse_service_line(entry));
                }
            }
        }

        let mut client = Client::new(name, phone, email)?;
        client.client_id = client_id.to_string();
        client.registered_on = registered_on.to_string();
        client.services = services;
        Ok(client)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (ID: {}, services: {})",
            self.name,
            self.client_id,
            self.services.len()
        )
    }
}

fn parse_service_line(entry: &str) -> Service {
    if let Some((description, rest)) = entry.rsplit_once('(') {
        if let Some(timestamp) = rest.strip_suffix(')') {
            return Service {
                description: description.trim().to_string(),
                requested_at: Some(timestamp.to_string()),
            };
        }
    }
    Service {
        description: entry.trim().to_string(),
        requested_at: None,
    }
}
