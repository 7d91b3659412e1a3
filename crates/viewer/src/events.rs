/// Change notifications delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    ActiveViewChanged,
    FileRenamed { from: String, to: String },
    FileDeleted { path: String },
    /// A file was created at `path`
    FileCreated { path: String },
    /// The metadata cache re-read one file
    MetadataChanged { path: String },
    /// The metadata cache resolved links; arrives in bursts
    MetadataResolved,
}

impl ChangeEvent {
    pub const fn reason(&self) -> &'static str {
        match self {
            ChangeEvent::ActiveViewChanged => "active_view_changed",
            ChangeEvent::FileRenamed { .. } => "file_renamed",
            ChangeEvent::FileDeleted { .. } => "file_deleted",
            ChangeEvent::FileCreated { .. } => "file_created",
            ChangeEvent::MetadataChanged { .. } => "metadata_changed",
            ChangeEvent::MetadataResolved => "metadata_resolved",
        }
    }
}
