mod advice;
mod common;
mod ranking;
mod scoring;
