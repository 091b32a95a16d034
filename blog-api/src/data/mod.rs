pub mod comment_repository;
pub mod post_repository;

#[cfg(test)]
pub mod test_support;
