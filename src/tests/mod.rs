mod json_parser_tests;
