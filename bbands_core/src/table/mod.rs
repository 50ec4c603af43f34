pub mod band_table;
