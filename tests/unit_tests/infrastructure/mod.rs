mod observability_test;
