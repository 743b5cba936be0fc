pub mod mailing_list;

pub use mailing_list::MailingListClient;
