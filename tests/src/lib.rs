//! End-to-end checks for the scan engine, run against loopback listeners.

mod scan;
