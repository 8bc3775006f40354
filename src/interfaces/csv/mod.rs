pub mod payout_reader;
pub mod report_writer;
