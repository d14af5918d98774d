mod dashboard;
mod helpers;
mod requests;
