mod helpers;
mod open_timesheet;
