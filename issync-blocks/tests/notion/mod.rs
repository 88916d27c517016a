//! Page payload tests, starting from issue JSON.

mod page;
