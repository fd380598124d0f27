use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a lecture, practical or independent work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Draft,
    Published,
    Archived,
}

impl Status {
    pub fn is_published(self) -> bool {
        matches!(self, Status::Published)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Status::Draft => "draft",
            Status::Published => "published",
            Status::Archived => "archived",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(Status::Draft),
            "published" => Ok(Status::Published),
            "archived" => Ok(Status::Archived),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecture {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub video_url: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub order_number: u32,
    pub status: Status,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewLecture {
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub video_url: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub order_number: u32,
    pub status: Status,
    pub created_by: Uuid,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct LectureUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub content: Option<String>,
    pub video_url: Option<Option<String>>,
    pub file: Option<Option<Attachment>>,
    pub order_number: Option<u32>,
    pub status: Option<Status>,
}

impl Lecture {
    pub fn from_new(new: NewLecture) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            content: new.content,
            video_url: new.video_url,
            file_url: new.file_url,
            file_name: new.file_name,
            order_number: new.order_number,
            status: new.status,
            created_by: new.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: LectureUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(video_url) = update.video_url {
            self.video_url = video_url;
        }
        if let Some(file) = update.file {
            (self.file_url, self.file_name) = Attachment::split(file);
        }
        if let Some(order_number) = update.order_number {
            self.order_number = order_number;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

/// Stored-file metadata attached to a content record.
///
/// Uploading is done elsewhere; only the resulting location is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub url: String,
    pub name: String,
}

impl Attachment {
    fn split(file: Option<Attachment>) -> (Option<String>, Option<String>) {
        match file {
            Some(file) => (Some(file.url), Some(file.name)),
            None => (None, None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practical {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub order_number: u32,
    pub status: Status,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewPractical {
    pub title: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub order_number: u32,
    pub status: Status,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct PracticalUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub file: Option<Option<Attachment>>,
    pub order_number: Option<u32>,
    pub status: Option<Status>,
}

impl Practical {
    pub fn from_new(new: NewPractical) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            file_url: new.file_url,
            file_name: new.file_name,
            order_number: new.order_number,
            status: new.status,
            created_by: new.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: PracticalUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(file) = update.file {
            (self.file_url, self.file_name) = Attachment::split(file);
        }
        if let Some(order_number) = update.order_number {
            self.order_number = order_number;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndependentWork {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub order_number: u32,
    pub status: Status,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewIndependentWork {
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub order_number: u32,
    pub status: Status,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct IndependentWorkUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub content: Option<String>,
    pub file: Option<Option<Attachment>>,
    pub order_number: Option<u32>,
    pub status: Option<Status>,
}

impl IndependentWork {
    pub fn from_new(new: NewIndependentWork) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            content: new.content,
            file_url: new.file_url,
            file_name: new.file_name,
            order_number: new.order_number,
            status: new.status,
            created_by: new.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: IndependentWorkUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(file) = update.file {
            (self.file_url, self.file_name) = Attachment::split(file);
        }
        if let Some(order_number) = update.order_number {
            self.order_number = order_number;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}
