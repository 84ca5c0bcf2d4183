// Code Completeness Validator
// Lightweight static checks on submitted code before it is run or graded.
// Text scanning over a lexed view of the code, not a compiler front end.

pub mod handlers;
pub mod lexer;
pub mod models;
pub mod rules;
pub mod validator;
