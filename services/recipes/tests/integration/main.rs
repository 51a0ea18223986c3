mod presentation_test;
mod recipe_test;
mod relation_test;
mod shopping_list_test;
