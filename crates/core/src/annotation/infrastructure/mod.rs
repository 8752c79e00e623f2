pub mod cpu_annotator;
