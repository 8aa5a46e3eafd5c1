use std::io;
use std::path::Path;

use crate::domain::ApplicationRecord;

const HEADER: [&str; 17] = [
    "id",
    "first_name",
    "last_name",
    "email",
    "phone",
    "country",
    "age",
    "org_name",
    "org_type",
    "position",
    "org_website",
    "focus_areas",
    "motivation",
    "experience",
    "contribution",
    "status",
    "submitted_date",
];

pub struct ApplicationCsvExporter;

impl ApplicationCsvExporter {
    /// Writes a header row and one row per application. Returns the number of
    /// applications written.
    pub fn write<'a, W, I>(writer: W, applications: I) -> Result<usize, csv::Error>
    where
        W: io::Write,
        I: IntoIterator<Item = &'a ApplicationRecord>,
    {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(HEADER)?;

        let mut count = 0;
        for app in applications {
            let age = app.age.to_string();
            let focus_areas = app.focus_areas.join("; ");
            let submitted = app.submitted_date.format("%Y-%m-%d").to_string();
            csv_writer.write_record([
                app.id.as_str(),
                app.first_name.as_str(),
                app.last_name.as_str(),
                app.email.as_str(),
                app.phone.as_str(),
                app.country.as_str(),
                age.as_str(),
                app.org_name.as_str(),
                app.org_type.as_str(),
                app.position.as_str(),
                app.org_website.as_str(),
                focus_areas.as_str(),
                app.motivation.as_str(),
                app.experience.as_str(),
                app.contribution.as_str(),
                app.status.as_str(),
                submitted.as_str(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    pub fn export_to_path<'a, I>(applications: I, path: impl AsRef<Path>) -> Result<usize, csv::Error>
    where
        I: IntoIterator<Item = &'a ApplicationRecord>,
    {
        let file = std::fs::File::create(path.as_ref())?;
        let count = Self::write(file, applications)?;
        tracing::info!(count, path = %path.as_ref().display(), "exported applications");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicationQueue, ApplicationStatus, PlatformData, seed_sample_data};
    use tempfile::TempDir;

    fn sample() -> PlatformData {
        let mut data = PlatformData::default();
        seed_sample_data(&mut data);
        data
    }

    #[test]
    fn test_write_header_and_rows() {
        let data = sample();
        let mut out = Vec::new();
        let count = ApplicationCsvExporter::write(&mut out, &data.applications).unwrap();
        assert_eq!(count, 3);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id,first_name,last_name"));
        assert!(lines[1].starts_with("APP001,Alice,Johnson"));
        assert!(lines[1].contains("Education; Gender"));
        assert!(lines[2].contains("under_review"));
    }

    #[test]
    fn test_export_filtered_view_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("accepted.csv");
        let data = sample();

        let view = ApplicationQueue::new(&data).list(ApplicationStatus::Accepted.into());
        let count = ApplicationCsvExporter::export_to_path(view, &path).unwrap();
        assert_eq!(count, 1);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "APP003");
        assert_eq!(&rows[0][15], "accepted");
    }
}
