pub mod align_image_use_case;
pub mod alignment_report;
pub mod pipeline_logger;
