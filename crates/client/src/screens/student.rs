//! Student detail: edit form with dependent selects and the provisional
//! certificate download.

use std::path::{Path, PathBuf};

use campus_core::models::{Batch, Semester, Student, UpdateStudent};
use campus_core::resource::Students;
use campus_core::types::DbId;

use super::detail::{DetailScreen, ReferenceData};
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::navigator::Navigator;

pub struct StudentDetail {
    screen: DetailScreen<Students>,
    references: ReferenceData,
    selected_batch: Option<DbId>,
    batch_semesters: Vec<Semester>,
    download_dir: PathBuf,
    downloading: bool,
}

impl StudentDetail {
    pub fn new(api: ApiClient, navigator: Navigator, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            screen: DetailScreen::new(api, navigator),
            references: ReferenceData::default(),
            selected_batch: None,
            batch_semesters: Vec::new(),
            download_dir: download_dir.into(),
            downloading: false,
        }
    }

    /// Load the student, the select options and the semesters of the
    /// student's current batch.
    pub async fn load(&mut self, id: DbId) -> Result<(), ClientError> {
        self.screen.load(id).await?;
        self.references = ReferenceData::load(self.screen.api()).await?;
        let batch_id = self.student().and_then(Student::effective_batch_id);
        if let Some(batch_id) = batch_id {
            self.select_batch(batch_id).await?;
        }
        Ok(())
    }

    pub fn screen(&self) -> &DetailScreen<Students> {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut DetailScreen<Students> {
        &mut self.screen
    }

    pub fn student(&self) -> Option<&Student> {
        self.screen.record()
    }

    pub fn references(&self) -> &ReferenceData {
        &self.references
    }

    pub fn selected_batch(&self) -> Option<DbId> {
        self.selected_batch
    }

    /// Semester options for the currently selected batch.
    pub fn semester_options(&self) -> &[Semester] {
        &self.batch_semesters
    }

    /// Switch the batch select and refetch that batch's semesters.
    ///
    /// A semester that does not belong to the new batch is cleared from
    /// the form.
    pub async fn select_batch(&mut self, batch_id: DbId) -> Result<(), ClientError> {
        let batch: Batch = match self.screen.api().get(&format!("/batch/{batch_id}")).await {
            Ok(batch) => batch,
            Err(e) => {
                let err = ClientError::from(e);
                self.screen.api().notices().report(&err).await;
                return Err(err);
            }
        };
        self.selected_batch = Some(batch_id);
        self.batch_semesters = batch.semesters;

        let semesters = &self.batch_semesters;
        if let Some(form) = self.screen.form_mut() {
            form.batch_id = Some(batch_id);
            if form
                .semester_id
                .is_some_and(|sid| !semesters.iter().any(|s| s.id == sid))
            {
                form.semester_id = None;
            }
        }
        Ok(())
    }

    pub async fn submit(&mut self, form: UpdateStudent) -> Result<(), ClientError> {
        self.screen.submit(form).await
    }

    pub fn is_downloading(&self) -> bool {
        self.downloading
    }

    /// Save the provisional certificate PDF into the download directory.
    pub async fn download_certificate(&mut self) -> Result<PathBuf, ClientError> {
        let student = self
            .student()
            .cloned()
            .ok_or(ClientError::NotLoaded("Student"))?;

        self.downloading = true;
        let result = self.fetch_certificate(&student).await;
        self.downloading = false;

        let notices = self.screen.api().notices();
        match result {
            Ok(path) => {
                tracing::info!(student_id = student.id, path = %path.display(), "Certificate saved");
                notices.success("Certificate downloaded successfully").await;
                Ok(path)
            }
            Err(err) => {
                tracing::warn!(student_id = student.id, error = %err, "Certificate download failed");
                if !err.is_reported() {
                    notices.error("Failed to download certificate").await;
                }
                Err(err)
            }
        }
    }

    async fn fetch_certificate(&self, student: &Student) -> Result<PathBuf, ClientError> {
        let bytes = self
            .screen
            .api()
            .get_bytes(&format!("/students/{}/certificate/provisional", student.id))
            .await?;
        let path = certificate_path(&self.download_dir, student);
        tokio::fs::create_dir_all(&self.download_dir).await?;
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

/// `{dir}/Provisional Certificate - {first} {last}.pdf`
///
/// Characters that cannot appear in a file name are replaced with `_`, so
/// the file always lands directly inside `dir`.
pub fn certificate_path(dir: &Path, student: &Student) -> PathBuf {
    let name = match student.last_name.as_deref().filter(|l| !l.is_empty()) {
        Some(last) => format!("{} {last}", student.first_name),
        None => student.first_name.clone(),
    };
    dir.join(format!("Provisional Certificate - {}.pdf", file_safe(&name)))
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
