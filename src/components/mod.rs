// Export components
pub mod extractor;
pub mod nylas;

// Re-export the calendar client
pub use nylas::NylasClient;
